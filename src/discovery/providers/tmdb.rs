//! TMDB (The Movie Database) search adapter.
//!
//! Implements [`SearchProvider`] for both movies and TV shows by querying the
//! TMDB v3 REST API, and exposes the credit lookups used by enrichment.
//!
//! Features:
//! - Token-bucket rate limiting at 4 requests / second via [`governor`].
//! - Locale cascade: a successful-but-empty search in the primary language is
//!   retried once in the fallback language. Errors are not retried.
//! - Ratings rescaled from 0-10 onto 0-5.

use std::sync::Arc;

use async_trait::async_trait;
use mediascout_common::rating::rescale_ten_point;
use mediascout_common::text::{non_empty, year_of};
use mediascout_common::{Error, ProviderKey, Result};
use serde::Deserialize;
use tracing::debug;

use crate::discovery::candidate::{external_id, CanonicalCandidate, EnrichmentKey};
use crate::discovery::http::ApiClient;
use crate::discovery::provider::SearchProvider;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";
const REQUESTS_PER_SECOND: u32 = 4;

/// Which TMDB catalogue a search or lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TmdbMedia {
    Movie,
    Tv,
}

impl TmdbMedia {
    /// Path segment and external-id subtype (`"movie"` / `"tv"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Tv => "tv",
        }
    }
}

// ---------------------------------------------------------------------------
// TMDB API response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TmdbSearchResponse {
    #[serde(default)]
    results: Vec<TmdbSearchResult>,
}

/// Movie and TV results share a shape apart from field names.
#[derive(Debug, Deserialize)]
struct TmdbSearchResult {
    id: u64,
    /// Movie title or TV show name.
    #[serde(alias = "name")]
    title: Option<String>,
    #[serde(alias = "first_air_date")]
    release_date: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    vote_average: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TmdbCredits {
    #[serde(default)]
    crew: Vec<TmdbCrewMember>,
}

#[derive(Debug, Deserialize)]
struct TmdbCrewMember {
    name: String,
    job: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbTvDetail {
    #[serde(default)]
    created_by: Vec<TmdbCreator>,
}

#[derive(Debug, Deserialize)]
struct TmdbCreator {
    name: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Shared TMDB API client used by the movie and TV adapters and by
/// enrichment.
pub struct TmdbClient {
    api: ApiClient,
    api_key: String,
}

impl TmdbClient {
    /// Create a client with the given v3 API key. An empty key leaves the
    /// client unconfigured.
    pub fn new(api_key: String) -> Self {
        let api = ApiClient::new(TMDB_BASE_URL, concat!("mediascout/", env!("CARGO_PKG_VERSION")))
            .with_rate_limit(REQUESTS_PER_SECOND);
        Self { api, api_key }
    }

    /// Point the client at a different API root (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api = self.api.with_base_url(base_url);
        self
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        extra_params: &[(&str, &str)],
    ) -> Result<T> {
        if !self.is_configured() {
            return Err(Error::not_configured("tmdb"));
        }

        let mut params: Vec<(&str, &str)> = vec![("api_key", self.api_key.as_str())];
        params.extend_from_slice(extra_params);

        self.api.get_json(path, &params, &[]).await
    }

    async fn search(
        &self,
        media: TmdbMedia,
        query: &str,
        language: &str,
    ) -> Result<Vec<TmdbSearchResult>> {
        debug!(media = media.as_str(), language, "TMDB search");
        let body: TmdbSearchResponse = self
            .get(
                &format!("/search/{}", media.as_str()),
                &[
                    ("query", query),
                    ("language", language),
                    ("include_adult", "false"),
                ],
            )
            .await?;
        Ok(body.results)
    }

    /// First crew member credited as `Director` on a movie.
    pub(crate) async fn movie_director(&self, id: u64) -> Result<Option<String>> {
        let credits: TmdbCredits = self.get(&format!("/movie/{id}/credits"), &[]).await?;
        Ok(credits
            .crew
            .into_iter()
            .find(|member| member.job.as_deref() == Some("Director"))
            .map(|member| member.name))
    }

    /// First listed creator of a TV show.
    pub(crate) async fn tv_creator(&self, id: u64) -> Result<Option<String>> {
        let detail: TmdbTvDetail = self.get(&format!("/tv/{id}"), &[]).await?;
        Ok(detail.created_by.into_iter().next().map(|c| c.name))
    }
}

// ---------------------------------------------------------------------------
// Provider implementation
// ---------------------------------------------------------------------------

/// TMDB-backed search adapter for one catalogue (movies or TV).
pub struct TmdbProvider {
    client: Arc<TmdbClient>,
    media: TmdbMedia,
    language: String,
    fallback_language: String,
    max_results: usize,
}

impl TmdbProvider {
    /// Create an adapter searching `media` in `language`, falling back to
    /// `fallback_language` when the primary locale has no results.
    pub fn new(
        client: Arc<TmdbClient>,
        media: TmdbMedia,
        language: String,
        fallback_language: String,
        max_results: usize,
    ) -> Self {
        Self {
            client,
            media,
            language,
            fallback_language,
            max_results,
        }
    }

    fn to_candidate(&self, result: TmdbSearchResult) -> Option<CanonicalCandidate> {
        let title = non_empty(result.title)?;

        let mut candidate = CanonicalCandidate::new(
            title,
            external_id("tmdb", self.media.as_str(), result.id),
        )
        .with_enrichment(EnrichmentKey::Tmdb {
            id: result.id,
            media: self.media,
        });

        candidate.years = year_of(result.release_date.as_deref());
        candidate.image = result
            .poster_path
            .map(|path| image_url(&path))
            .unwrap_or_default();
        candidate.excerpt = result.overview.unwrap_or_default().trim().to_string();
        candidate.external_rating = rescale_ten_point(result.vote_average);

        Some(candidate)
    }
}

/// Convert a TMDB poster path fragment to a full URL.
fn image_url(path: &str) -> String {
    format!("{TMDB_IMAGE_BASE}{path}")
}

#[async_trait]
impl SearchProvider for TmdbProvider {
    fn key(&self) -> ProviderKey {
        match self.media {
            TmdbMedia::Movie => ProviderKey::Movie,
            TmdbMedia::Tv => ProviderKey::Tv,
        }
    }

    fn is_available(&self) -> bool {
        self.client.is_configured()
    }

    async fn lookup(&self, query: &str) -> Result<Vec<CanonicalCandidate>> {
        let mut results = self
            .client
            .search(self.media, query, &self.language)
            .await?;

        if results.is_empty() && self.fallback_language != self.language {
            debug!(
                media = self.media.as_str(),
                language = %self.language,
                fallback = %self.fallback_language,
                "No results in primary locale; retrying in fallback locale"
            );
            results = self
                .client
                .search(self.media, query, &self.fallback_language)
                .await?;
        }

        Ok(results
            .into_iter()
            .filter_map(|r| self.to_candidate(r))
            .take(self.max_results)
            .collect())
    }
}
