//! Provider adapters and the types they share.
//!
//! This module turns free-text queries into [`CanonicalCandidate`]s by asking
//! one external catalogue per content category.
//!
//! # Module layout
//!
//! - [`candidate`] -- The canonical result shape and the selection payload.
//! - [`provider`] -- The [`SearchProvider`] trait.
//! - [`providers`] -- TMDB, Open Library, RAWG, and Nominatim adapters.
//! - [`registry`] -- Key-to-adapter lookup.
//! - [`router`] -- Host content-domain tokens to provider keys.
//! - [`thumbnail`] -- Wikipedia thumbnails for places.
//! - [`enrichment`] -- Creator lookups on commit.

pub mod candidate;
pub mod enrichment;
mod http;
pub mod provider;
pub mod providers;
pub mod registry;
pub mod router;
pub mod thumbnail;

use std::sync::Arc;

use crate::config::Config;

pub use candidate::{CanonicalCandidate, SelectedCandidate};
pub use enrichment::EnrichmentService;
pub use provider::SearchProvider;
pub use registry::ProviderRegistry;
pub use router::{domain_for_provider, provider_for_domain};
pub use thumbnail::ThumbnailResolver;

use providers::{
    NominatimProvider, OpenLibraryProvider, RawgClient, RawgProvider, TmdbClient, TmdbMedia,
    TmdbProvider,
};

/// API roots for every upstream service.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub tmdb: String,
    pub openlibrary: String,
    pub rawg: String,
    pub nominatim: String,
    /// `None` resolves `https://<lang>.wikipedia.org` per request.
    pub wikipedia: Option<String>,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            tmdb: providers::tmdb::TMDB_BASE_URL.to_string(),
            openlibrary: providers::openlibrary::OPENLIBRARY_BASE_URL.to_string(),
            rawg: providers::rawg::RAWG_BASE_URL.to_string(),
            nominatim: providers::nominatim::NOMINATIM_BASE_URL.to_string(),
            wikipedia: None,
        }
    }
}

impl Endpoints {
    /// Route every service to one base URL, e.g. a local mock server.
    pub fn all(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            tmdb: base_url.clone(),
            openlibrary: base_url.clone(),
            rawg: base_url.clone(),
            nominatim: base_url.clone(),
            wikipedia: Some(base_url),
        }
    }
}

/// Build the adapter registry and the enrichment service from configuration.
///
/// TMDB and RAWG clients are shared between their adapters and enrichment so
/// a single rate limiter governs each upstream.
pub fn build(config: &Config, endpoints: &Endpoints) -> (ProviderRegistry, EnrichmentService) {
    let max_results = config.search.max_results;

    let tmdb = Arc::new(
        TmdbClient::new(config.tmdb.api_key.clone()).with_base_url(endpoints.tmdb.clone()),
    );
    let rawg = Arc::new(
        RawgClient::new(config.rawg.api_key.clone()).with_base_url(endpoints.rawg.clone()),
    );

    let mut thumbnails = ThumbnailResolver::new(&config.wikipedia, &config.nominatim.user_agent);
    if let Some(base) = &endpoints.wikipedia {
        thumbnails = thumbnails.with_base_url(base.clone());
    }

    let mut registry = ProviderRegistry::new();
    for media in [TmdbMedia::Movie, TmdbMedia::Tv] {
        registry.register(Arc::new(TmdbProvider::new(
            tmdb.clone(),
            media,
            config.tmdb.language.clone(),
            config.tmdb.fallback_language.clone(),
            max_results,
        )));
    }
    registry.register(Arc::new(
        OpenLibraryProvider::new(max_results).with_base_url(endpoints.openlibrary.clone()),
    ));
    registry.register(Arc::new(RawgProvider::new(rawg.clone(), max_results)));
    registry.register(Arc::new(
        NominatimProvider::new(&config.nominatim, Arc::new(thumbnails), max_results)
            .with_base_url(endpoints.nominatim.clone()),
    ));

    (registry, EnrichmentService::new(Some(tmdb), Some(rawg)))
}
