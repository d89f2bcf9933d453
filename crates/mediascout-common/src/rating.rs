//! Rescaling of provider-native scores onto the canonical 0-5 scale.
//!
//! All helpers keep one decimal and round half-up. A missing, zero, negative,
//! or non-finite native score maps to `None`: "unrated" is never encoded as
//! `0.0`.

/// Upper bound of the canonical scale.
pub const MAX_RATING: f64 = 5.0;

/// Rescale a 0-10 score (e.g. TMDB `vote_average`) onto 0-5.
///
/// Computed as `round(score * 5) / 10`, which keeps the half-up rounding
/// exact for scores that are representable with one decimal.
///
/// ```
/// use mediascout_common::rating::rescale_ten_point;
///
/// assert_eq!(rescale_ten_point(Some(7.5)), Some(3.8));
/// assert_eq!(rescale_ten_point(None), None);
/// ```
pub fn rescale_ten_point(score: Option<f64>) -> Option<f64> {
    let score = usable(score)?;
    Some(((score * 5.0).round() / 10.0).min(MAX_RATING))
}

/// Rescale a 0-100 score (e.g. a Metacritic critic score) onto 0-5.
///
/// ```
/// use mediascout_common::rating::rescale_hundred_point;
///
/// assert_eq!(rescale_hundred_point(Some(85)), Some(4.3));
/// assert_eq!(rescale_hundred_point(Some(0)), None);
/// ```
pub fn rescale_hundred_point(score: Option<u32>) -> Option<f64> {
    let score = usable(score.map(f64::from))?;
    Some(((score / 2.0).round() / 10.0).min(MAX_RATING))
}

/// Round a score that is already on 0-5 (e.g. Open Library averages).
pub fn round_five_point(score: Option<f64>) -> Option<f64> {
    let score = usable(score)?;
    Some(((score * 10.0).round() / 10.0).min(MAX_RATING))
}

fn usable(score: Option<f64>) -> Option<f64> {
    score.filter(|s| s.is_finite() && *s > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_point_halves_and_rounds_half_up() {
        assert_eq!(rescale_ten_point(Some(10.0)), Some(5.0));
        assert_eq!(rescale_ten_point(Some(8.0)), Some(4.0));
        assert_eq!(rescale_ten_point(Some(7.5)), Some(3.8));
        assert_eq!(rescale_ten_point(Some(6.5)), Some(3.3));
        assert_eq!(rescale_ten_point(Some(7.3)), Some(3.7));
        assert_eq!(rescale_ten_point(Some(7.24)), Some(3.6));
    }

    #[test]
    fn ten_point_missing_or_zero_is_none() {
        assert_eq!(rescale_ten_point(None), None);
        assert_eq!(rescale_ten_point(Some(0.0)), None);
        assert_eq!(rescale_ten_point(Some(-1.0)), None);
        assert_eq!(rescale_ten_point(Some(f64::NAN)), None);
    }

    #[test]
    fn ten_point_is_clamped() {
        assert_eq!(rescale_ten_point(Some(12.0)), Some(5.0));
    }

    #[test]
    fn ten_point_is_monotonic() {
        let mut previous = 0.0;
        for step in 1..=1000 {
            let native = f64::from(step) / 100.0;
            let mapped = rescale_ten_point(Some(native)).unwrap();
            assert!(
                mapped >= previous,
                "{native} mapped to {mapped}, below {previous}"
            );
            previous = mapped;
        }
    }

    #[test]
    fn hundred_point_divides_by_twenty() {
        assert_eq!(rescale_hundred_point(Some(100)), Some(5.0));
        assert_eq!(rescale_hundred_point(Some(97)), Some(4.9));
        assert_eq!(rescale_hundred_point(Some(85)), Some(4.3));
        assert_eq!(rescale_hundred_point(Some(1)), Some(0.1));
        assert_eq!(rescale_hundred_point(None), None);
        assert_eq!(rescale_hundred_point(Some(0)), None);
    }

    #[test]
    fn hundred_point_is_monotonic() {
        let mapped: Vec<f64> = (1..=100)
            .map(|s| rescale_hundred_point(Some(s)).unwrap())
            .collect();
        assert!(mapped.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn five_point_keeps_scale() {
        assert_eq!(round_five_point(Some(4.25)), Some(4.3));
        assert_eq!(round_five_point(Some(3.0)), Some(3.0));
        assert_eq!(round_five_point(Some(0.0)), None);
        assert_eq!(round_five_point(None), None);
    }
}
