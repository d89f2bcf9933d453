//! Small string helpers used when mapping provider payloads.

/// Extract the leading four-digit year from a date such as `"2021-09-15"`.
///
/// Returns an empty string when the input is missing or does not start with
/// four ASCII digits.
///
/// ```
/// use mediascout_common::text::year_of;
///
/// assert_eq!(year_of(Some("2021-09-15")), "2021");
/// assert_eq!(year_of(Some("")), "");
/// assert_eq!(year_of(None), "");
/// ```
pub fn year_of(date: Option<&str>) -> String {
    date.and_then(|d| d.get(..4))
        .filter(|y| y.bytes().all(|b| b.is_ascii_digit()))
        .map(str::to_string)
        .unwrap_or_default()
}

/// Truncate to at most `max` characters (not bytes).
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Split a comma-separated label into trimmed, non-empty segments.
pub fn comma_segments(label: &str) -> Vec<&str> {
    label
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Collapse `None`, `""`, and whitespace-only strings into `None`.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
