//! Query gating and dispatch to a single provider.
//!
//! The [`Aggregator`] is the stateless half of the search orchestrator: it
//! decides whether a query is long enough, routes it to the adapter serving
//! the active provider, and caps the result list. Debounce and staleness live
//! in [`SearchSession`](super::SearchSession).

use mediascout_common::ProviderKey;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{Config, SearchConfig};
use crate::discovery::{self, CanonicalCandidate, EnrichmentService, Endpoints, ProviderRegistry};

/// Advisory text for the host UI while the result list is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchHint {
    /// The active provider needs an API key that is not configured.
    NotConfigured { provider: ProviderKey },
    /// The query is shorter than the provider's minimum.
    TypeMore { remaining: usize },
}

/// Routes gated queries to the adapter for the active provider.
pub struct Aggregator {
    registry: ProviderRegistry,
    enrichment: EnrichmentService,
    settings: SearchConfig,
}

impl Aggregator {
    pub fn new(
        registry: ProviderRegistry,
        enrichment: EnrichmentService,
        settings: SearchConfig,
    ) -> Self {
        Self {
            registry,
            enrichment,
            settings,
        }
    }

    /// Build every adapter from `config` against the public endpoints.
    pub fn from_config(config: &Config) -> Self {
        Self::with_endpoints(config, &Endpoints::default())
    }

    /// Build every adapter from `config` against explicit endpoints.
    pub fn with_endpoints(config: &Config, endpoints: &Endpoints) -> Self {
        let (registry, enrichment) = discovery::build(config, endpoints);
        Self::new(registry, enrichment, config.search.clone())
    }

    pub fn settings(&self) -> &SearchConfig {
        &self.settings
    }

    pub fn min_chars(&self, provider: ProviderKey) -> usize {
        self.settings.min_chars_for(provider)
    }

    /// Whether `query` is long enough to be sent to `provider`.
    pub fn accepts(&self, provider: ProviderKey, query: &str) -> bool {
        query.trim().chars().count() >= self.min_chars(provider)
    }

    /// Whether `provider` has an adapter with the credentials it needs.
    pub fn is_configured(&self, provider: ProviderKey) -> bool {
        self.registry
            .get(provider)
            .is_some_and(|adapter| adapter.is_available())
    }

    /// Search `provider` for `query`.
    ///
    /// The query is trimmed first. Queries below the provider's minimum
    /// return an empty list without any network call. Adapter failures also
    /// surface as an empty list.
    pub async fn search(&self, provider: ProviderKey, query: &str) -> Vec<CanonicalCandidate> {
        let query = query.trim();
        if !self.accepts(provider, query) {
            debug!(provider = %provider, "Query below minimum length; not searching");
            return Vec::new();
        }

        let Some(adapter) = self.registry.get(provider) else {
            warn!(provider = %provider, "No adapter registered");
            return Vec::new();
        };

        let mut results = adapter.search(query).await;
        results.truncate(self.settings.max_results);
        results
    }

    /// Fill the creator of a committed candidate where the provider supports it.
    pub async fn enrich(&self, candidate: CanonicalCandidate) -> CanonicalCandidate {
        self.enrichment.enrich_candidate(candidate).await
    }

    /// Advisory for an empty result list, if any applies.
    pub fn hint(&self, provider: ProviderKey, query: &str) -> Option<SearchHint> {
        if !self.is_configured(provider) {
            return Some(SearchHint::NotConfigured { provider });
        }

        let typed = query.trim().chars().count();
        let min = self.min_chars(provider);
        (typed > 0 && typed < min).then_some(SearchHint::TypeMore {
            remaining: min - typed,
        })
    }
}
