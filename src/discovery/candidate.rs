//! The canonical candidate shape every provider adapter produces.
//!
//! [`CanonicalCandidate`] is the only type that crosses the aggregator
//! boundary. All public fields are always present when serialized (strings
//! default to `""`, optional numbers to `null`) so the host form never has to
//! know which provider produced a candidate.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::providers::tmdb::TmdbMedia;

/// One search result, normalised across providers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalCandidate {
    /// Human-readable name. Never empty.
    pub title: String,
    /// Director, author, or developer. May be empty until enrichment.
    #[serde(default)]
    pub creator: String,
    /// Year or year range as free text.
    #[serde(default)]
    pub years: String,
    /// Absolute artwork URL, or `""`.
    #[serde(default)]
    pub image: String,
    /// Short synopsis or description.
    #[serde(default)]
    pub excerpt: String,
    /// Rating on a 0-5 scale. `None` means unrated.
    #[serde(default)]
    pub external_rating: Option<f64>,
    /// Namespaced `<provider>:<subtype>:<id>` identifier.
    pub external_id: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub location_label: Option<String>,
    /// Provider lookup key for the enrichment round-trip.
    #[serde(skip)]
    pub(crate) enrichment: EnrichmentKey,
}

impl CanonicalCandidate {
    /// Create a candidate with every optional field at its empty default.
    pub fn new(title: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            creator: String::new(),
            years: String::new(),
            image: String::new(),
            excerpt: String::new(),
            external_rating: None,
            external_id: external_id.into(),
            latitude: None,
            longitude: None,
            location_label: None,
            enrichment: EnrichmentKey::None,
        }
    }

    /// Whether selecting this candidate triggers a secondary lookup.
    pub fn is_enrichable(&self) -> bool {
        self.enrichment != EnrichmentKey::None
    }

    pub(crate) fn with_enrichment(mut self, key: EnrichmentKey) -> Self {
        self.enrichment = key;
        self
    }
}

/// Provider-specific identifiers needed by the enrichment service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum EnrichmentKey {
    /// TMDB numeric id plus movie/tv subtype.
    Tmdb { id: u64, media: TmdbMedia },
    /// RAWG numeric game id.
    Rawg { id: u64 },
    #[default]
    None,
}

/// A committed candidate handed to the host together with its domain tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedCandidate {
    #[serde(flatten)]
    pub candidate: CanonicalCandidate,
    /// Host content-domain token (e.g. `"series"`), see [`super::router`].
    pub domain: String,
}

/// Build a `<provider>:<subtype>:<id>` identifier.
pub(crate) fn external_id(provider: &str, subtype: &str, id: impl fmt::Display) -> String {
    format!("{provider}:{subtype}:{id}")
}
