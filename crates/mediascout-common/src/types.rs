//! Core type definitions shared by the aggregator and its callers.
//!
//! [`ProviderKey`] names one adapter per content category. It serializes in
//! lowercase and is also the `<provider>` vocabulary the router maps host
//! content-domain tokens onto.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies one of the five search adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKey {
    /// Feature films (TMDB movie search).
    Movie,
    /// Television series (TMDB TV search).
    Tv,
    /// Books (Open Library).
    Book,
    /// Video games (RAWG).
    Game,
    /// Geographic places (Nominatim).
    Place,
}

impl ProviderKey {
    /// Every provider key, in router table order.
    pub const ALL: [ProviderKey; 5] = [
        ProviderKey::Movie,
        ProviderKey::Tv,
        ProviderKey::Book,
        ProviderKey::Game,
        ProviderKey::Place,
    ];

    /// Lowercase token used in logs, config, and the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
            Self::Book => "book",
            Self::Game => "game",
            Self::Place => "place",
        }
    }
}

impl fmt::Display for ProviderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKey {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" => Ok(Self::Movie),
            "tv" => Ok(Self::Tv),
            "book" => Ok(Self::Book),
            "game" => Ok(Self::Game),
            "place" => Ok(Self::Place),
            other => Err(crate::Error::invalid_input(format!(
                "unknown provider key: {other}"
            ))),
        }
    }
}
