//! RAWG video game search adapter.
//!
//! Requires an API key; without one the adapter reports itself unavailable
//! and game search yields nothing. The search payload has no developer
//! information, so the detail lookup used by enrichment lives on
//! [`RawgClient`].

use std::sync::Arc;

use async_trait::async_trait;
use mediascout_common::rating::rescale_hundred_point;
use mediascout_common::text::{non_empty, year_of};
use mediascout_common::{Error, ProviderKey, Result};
use serde::Deserialize;

use crate::discovery::candidate::{external_id, CanonicalCandidate, EnrichmentKey};
use crate::discovery::http::ApiClient;
use crate::discovery::provider::SearchProvider;

pub const RAWG_BASE_URL: &str = "https://api.rawg.io/api";

// ---- response types ----

#[derive(Debug, Deserialize)]
struct GameSearchResponse {
    #[serde(default)]
    results: Vec<GameSummary>,
}

#[derive(Debug, Deserialize)]
struct GameSummary {
    id: u64,
    name: Option<String>,
    released: Option<String>,
    background_image: Option<String>,
    metacritic: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GameDetail {
    #[serde(default)]
    developers: Vec<Developer>,
}

#[derive(Debug, Deserialize)]
struct Developer {
    name: String,
}

// ---- client ----

/// RAWG API client shared by the game adapter and enrichment.
pub struct RawgClient {
    api: ApiClient,
    api_key: String,
}

impl RawgClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api: ApiClient::new(RAWG_BASE_URL, concat!("mediascout/", env!("CARGO_PKG_VERSION"))),
            api_key,
        }
    }

    /// Point the client at a different API root (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api = self.api.with_base_url(base_url);
        self
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    async fn search(&self, query: &str, page_size: usize) -> Result<Vec<GameSummary>> {
        if !self.is_configured() {
            return Err(Error::not_configured("rawg"));
        }

        let page_size = page_size.to_string();
        let body: GameSearchResponse = self
            .api
            .get_json(
                "/games",
                &[
                    ("key", self.api_key.as_str()),
                    ("search", query),
                    ("page_size", page_size.as_str()),
                ],
                &[],
            )
            .await?;
        Ok(body.results)
    }

    /// Name of the first listed developer of a game.
    pub(crate) async fn developer(&self, id: u64) -> Result<Option<String>> {
        if !self.is_configured() {
            return Err(Error::not_configured("rawg"));
        }

        let detail: GameDetail = self
            .api
            .get_json(
                &format!("/games/{id}"),
                &[("key", self.api_key.as_str())],
                &[],
            )
            .await?;
        Ok(detail.developers.into_iter().next().map(|d| d.name))
    }
}

// ---- provider ----

/// RAWG-backed game search adapter.
pub struct RawgProvider {
    client: Arc<RawgClient>,
    max_results: usize,
}

impl RawgProvider {
    pub fn new(client: Arc<RawgClient>, max_results: usize) -> Self {
        Self {
            client,
            max_results,
        }
    }
}

fn to_candidate(game: GameSummary) -> Option<CanonicalCandidate> {
    let title = non_empty(game.name)?;

    let mut candidate = CanonicalCandidate::new(title, external_id("rawg", "game", game.id))
        .with_enrichment(EnrichmentKey::Rawg { id: game.id });

    candidate.years = year_of(game.released.as_deref());
    candidate.image = game.background_image.unwrap_or_default();
    candidate.external_rating = rescale_hundred_point(game.metacritic);

    Some(candidate)
}

#[async_trait]
impl SearchProvider for RawgProvider {
    fn key(&self) -> ProviderKey {
        ProviderKey::Game
    }

    fn is_available(&self) -> bool {
        self.client.is_configured()
    }

    async fn lookup(&self, query: &str) -> Result<Vec<CanonicalCandidate>> {
        let games = self.client.search(query, self.max_results).await?;

        Ok(games
            .into_iter()
            .filter_map(to_candidate)
            .take(self.max_results)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(json: serde_json::Value) -> GameSummary {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn maps_game_summary() {
        let candidate = to_candidate(game(serde_json::json!({
            "id": 3498,
            "name": "Grand Theft Auto V",
            "released": "2013-09-17",
            "background_image": "https://media.rawg.io/media/games/gta5.jpg",
            "metacritic": 92
        })))
        .unwrap();

        assert_eq!(candidate.external_id, "rawg:game:3498");
        assert_eq!(candidate.years, "2013");
        assert_eq!(candidate.image, "https://media.rawg.io/media/games/gta5.jpg");
        assert_eq!(candidate.external_rating, Some(4.6));
        assert_eq!(candidate.excerpt, "");
        assert_eq!(candidate.enrichment, EnrichmentKey::Rawg { id: 3498 });
    }

    #[test]
    fn zero_metacritic_is_unrated() {
        let candidate = to_candidate(game(serde_json::json!({
            "id": 1,
            "name": "Obscure",
            "metacritic": 0,
            "background_image": null
        })))
        .unwrap();
        assert_eq!(candidate.external_rating, None);
        assert_eq!(candidate.image, "");
        assert_eq!(candidate.years, "");
    }

    #[test]
    fn unconfigured_client_is_unavailable() {
        let provider = RawgProvider::new(Arc::new(RawgClient::new(String::new())), 5);
        assert!(!provider.is_available());
        assert_eq!(provider.key(), ProviderKey::Game);
    }

    #[tokio::test]
    async fn unconfigured_lookup_reports_configuration_error() {
        let client = RawgClient::new("  ".into());
        let err = client.developer(1).await.unwrap_err();
        assert!(err.is_configuration());
    }
}
