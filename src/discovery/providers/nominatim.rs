//! Nominatim (OpenStreetMap) place search adapter.
//!
//! Nominatim carries no imagery, so each hit's thumbnail is resolved through
//! [`ThumbnailResolver`] from the `wikipedia` extratag, falling back to the
//! place title. Lookups for all hits run concurrently and a failed one only
//! leaves that candidate's image empty.
//!
//! The public instance allows roughly one request per second and requires an
//! identifying User-Agent; both are enforced here.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use mediascout_common::text::comma_segments;
use mediascout_common::{ProviderKey, Result};
use serde::Deserialize;

use crate::config::NominatimConfig;
use crate::discovery::candidate::{external_id, CanonicalCandidate};
use crate::discovery::http::ApiClient;
use crate::discovery::provider::SearchProvider;
use crate::discovery::thumbnail::ThumbnailResolver;

pub const NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";
const REQUESTS_PER_SECOND: u32 = 1;

#[derive(Debug, Deserialize)]
struct Place {
    place_id: Option<u64>,
    osm_type: Option<String>,
    osm_id: Option<u64>,
    #[serde(default)]
    display_name: String,
    lat: Option<String>,
    lon: Option<String>,
    address: Option<Address>,
    extratags: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Default, Deserialize)]
struct Address {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
}

impl Place {
    /// Locality name, or the first segment of the display name.
    fn title(&self) -> Option<String> {
        self.address
            .as_ref()
            .and_then(|a| {
                [&a.city, &a.town, &a.village]
                    .into_iter()
                    .flatten()
                    .find(|name| !name.trim().is_empty())
                    .map(|name| name.trim().to_string())
            })
            .or_else(|| {
                comma_segments(&self.display_name)
                    .first()
                    .map(|s| s.to_string())
            })
    }

    /// The second and third display-name segments (region, country).
    fn excerpt(&self) -> String {
        comma_segments(&self.display_name)
            .iter()
            .skip(1)
            .take(2)
            .copied()
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn external_id(&self) -> Option<String> {
        match (&self.osm_type, self.osm_id, self.place_id) {
            (Some(osm_type), Some(osm_id), _) if !osm_type.is_empty() => {
                Some(external_id("nominatim", osm_type, osm_id))
            }
            (_, _, Some(place_id)) => Some(external_id("nominatim", "place", place_id)),
            _ => None,
        }
    }

    fn wiki_tag(&self) -> Option<&str> {
        self.extratags
            .as_ref()
            .and_then(|tags| tags.get("wikipedia"))
            .and_then(|value| value.as_str())
    }
}

fn parse_coordinate(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Nominatim-backed place search adapter.
pub struct NominatimProvider {
    api: ApiClient,
    accept_language: String,
    thumbnails: Arc<ThumbnailResolver>,
    max_results: usize,
}

impl NominatimProvider {
    pub fn new(
        config: &NominatimConfig,
        thumbnails: Arc<ThumbnailResolver>,
        max_results: usize,
    ) -> Self {
        Self {
            api: ApiClient::new(NOMINATIM_BASE_URL, &config.user_agent)
                .with_rate_limit(REQUESTS_PER_SECOND),
            accept_language: config.accept_language.clone(),
            thumbnails,
            max_results,
        }
    }

    /// Point the adapter at a different API root (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api = self.api.with_base_url(base_url);
        self
    }

    async fn to_candidate(&self, place: Place) -> Option<CanonicalCandidate> {
        let title = place.title()?;
        let id = place.external_id()?;

        let mut candidate = CanonicalCandidate::new(title, id);
        candidate.excerpt = place.excerpt();
        candidate.latitude = parse_coordinate(place.lat.as_deref());
        candidate.longitude = parse_coordinate(place.lon.as_deref());
        candidate.location_label = Some(place.display_name.trim().to_string())
            .filter(|label| !label.is_empty());
        candidate.image = self
            .thumbnails
            .resolve(place.wiki_tag(), Some(candidate.title.as_str()))
            .await
            .unwrap_or_default();

        Some(candidate)
    }
}

#[async_trait]
impl SearchProvider for NominatimProvider {
    fn key(&self) -> ProviderKey {
        ProviderKey::Place
    }

    async fn lookup(&self, query: &str) -> Result<Vec<CanonicalCandidate>> {
        let limit = self.max_results.to_string();
        let places: Vec<Place> = self
            .api
            .get_json(
                "/search",
                &[
                    ("q", query),
                    ("format", "jsonv2"),
                    ("addressdetails", "1"),
                    ("extratags", "1"),
                    ("limit", limit.as_str()),
                ],
                &[("Accept-Language", self.accept_language.as_str())],
            )
            .await?;

        let candidates = join_all(
            places
                .into_iter()
                .take(self.max_results)
                .map(|place| self.to_candidate(place)),
        )
        .await;

        Ok(candidates.into_iter().flatten().collect())
    }
}
