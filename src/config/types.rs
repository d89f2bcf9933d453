use std::time::Duration;

use mediascout_common::ProviderKey;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub tmdb: TmdbConfig,

    #[serde(default)]
    pub rawg: RawgConfig,

    #[serde(default)]
    pub nominatim: NominatimConfig,

    #[serde(default)]
    pub wikipedia: WikipediaConfig,
}

/// Gating, debounce, and result-cap settings for the search orchestrator.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a search is issued
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Minimum trimmed query length for every provider except places
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,

    /// Minimum trimmed query length for place lookups
    #[serde(default = "default_place_min_chars")]
    pub place_min_chars: usize,

    /// Upper bound on candidates returned per search
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_debounce_ms() -> u64 {
    400
}
fn default_min_chars() -> usize {
    2
}
fn default_place_min_chars() -> usize {
    3
}
fn default_max_results() -> usize {
    5
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_chars: default_min_chars(),
            place_min_chars: default_place_min_chars(),
            max_results: default_max_results(),
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Minimum trimmed query length accepted for `provider`.
    pub fn min_chars_for(&self, provider: ProviderKey) -> usize {
        match provider {
            ProviderKey::Place => self.place_min_chars,
            _ => self.min_chars,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    /// API key (v3). Movie and TV search are disabled when empty.
    #[serde(default)]
    pub api_key: String,

    /// Locale tried first
    #[serde(default = "default_tmdb_language")]
    pub language: String,

    /// Locale tried once when the primary locale returns no results
    #[serde(default = "default_tmdb_fallback_language")]
    pub fallback_language: String,
}

fn default_tmdb_language() -> String {
    "tr-TR".to_string()
}
fn default_tmdb_fallback_language() -> String {
    "en-US".to_string()
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            language: default_tmdb_language(),
            fallback_language: default_tmdb_fallback_language(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawgConfig {
    /// API key. Game search returns nothing when empty.
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NominatimConfig {
    /// Sent as the Accept-Language header
    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// Nominatim's usage policy requires an identifying User-Agent
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_accept_language() -> String {
    "tr,en".to_string()
}
fn default_user_agent() -> String {
    format!("mediascout/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            accept_language: default_accept_language(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WikipediaConfig {
    /// Language used when a place carries no `lang:title` wiki tag
    #[serde(default = "default_wikipedia_language")]
    pub default_language: String,

    /// Requested thumbnail width in pixels
    #[serde(default = "default_thumbnail_size")]
    pub thumbnail_size: u32,
}

fn default_wikipedia_language() -> String {
    "en".to_string()
}
fn default_thumbnail_size() -> u32 {
    400
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            default_language: default_wikipedia_language(),
            thumbnail_size: default_thumbnail_size(),
        }
    }
}
