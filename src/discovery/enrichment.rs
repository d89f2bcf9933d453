//! Creator enrichment for committed candidates.
//!
//! Search payloads from TMDB and RAWG do not name the director, show creator,
//! or developer. When the user commits such a candidate, the
//! [`EnrichmentService`] performs one extra lookup to fill
//! [`CanonicalCandidate::creator`].
//!
//! Enrichment never fails the selection: an unavailable client, an HTTP
//! error, or a payload without the field all leave the creator as it was.

use std::sync::Arc;

use mediascout_common::Result;
use tracing::{debug, warn};

use super::candidate::{CanonicalCandidate, EnrichmentKey};
use super::providers::rawg::RawgClient;
use super::providers::tmdb::{TmdbClient, TmdbMedia};

/// Service that resolves the creator of a committed candidate.
///
/// # Example
///
/// ```rust,ignore
/// let service = EnrichmentService::new(Some(tmdb), Some(rawg));
/// let creator = service.enrich(&candidate).await;
/// ```
#[derive(Clone, Default)]
pub struct EnrichmentService {
    tmdb: Option<Arc<TmdbClient>>,
    rawg: Option<Arc<RawgClient>>,
}

impl EnrichmentService {
    /// Create a service backed by the given clients. A missing client makes
    /// enrichment for that provider a no-op.
    pub fn new(tmdb: Option<Arc<TmdbClient>>, rawg: Option<Arc<RawgClient>>) -> Self {
        Self { tmdb, rawg }
    }

    /// A service that never performs lookups.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Resolve the creator for `candidate`.
    ///
    /// Returns the looked-up name when one is found and non-empty, otherwise
    /// the candidate's existing `creator` (usually `""`).
    pub async fn enrich(&self, candidate: &CanonicalCandidate) -> String {
        match self.lookup(candidate.enrichment).await {
            Ok(Some(name)) if !name.trim().is_empty() => {
                debug!(id = %candidate.external_id, creator = %name, "Enriched candidate");
                name.trim().to_string()
            }
            Ok(_) => candidate.creator.clone(),
            Err(e) => {
                warn!(
                    id = %candidate.external_id,
                    error = %e,
                    "Enrichment lookup failed; keeping existing creator"
                );
                candidate.creator.clone()
            }
        }
    }

    /// Return `candidate` with its creator filled in where possible.
    pub async fn enrich_candidate(&self, mut candidate: CanonicalCandidate) -> CanonicalCandidate {
        candidate.creator = self.enrich(&candidate).await;
        candidate
    }

    async fn lookup(&self, key: EnrichmentKey) -> Result<Option<String>> {
        match key {
            EnrichmentKey::Tmdb { id, media } => match &self.tmdb {
                Some(client) if client.is_configured() => match media {
                    TmdbMedia::Movie => client.movie_director(id).await,
                    TmdbMedia::Tv => client.tv_creator(id).await,
                },
                _ => Ok(None),
            },
            EnrichmentKey::Rawg { id } => match &self.rawg {
                Some(client) if client.is_configured() => client.developer(id).await,
                _ => Ok(None),
            },
            EnrichmentKey::None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn non_enrichable_candidate_keeps_creator() {
        let mut candidate = CanonicalCandidate::new("Dune", "openlibrary:work:OL893415W");
        candidate.creator = "Frank Herbert".into();

        let service = EnrichmentService::disabled();
        assert_eq!(service.enrich(&candidate).await, "Frank Herbert");
    }

    #[tokio::test]
    async fn missing_client_keeps_creator() {
        let candidate = CanonicalCandidate::new("Dune", "tmdb:movie:438631").with_enrichment(
            EnrichmentKey::Tmdb {
                id: 438631,
                media: TmdbMedia::Movie,
            },
        );

        let service = EnrichmentService::new(None, None);
        let enriched = service.enrich_candidate(candidate).await;
        assert_eq!(enriched.creator, "");
        assert_eq!(enriched.title, "Dune");
    }

    #[tokio::test]
    async fn unconfigured_client_makes_no_request() {
        let candidate = CanonicalCandidate::new("Hades", "rawg:game:274755")
            .with_enrichment(EnrichmentKey::Rawg { id: 274755 });

        // Unroutable base URL: any request would fail and log a warning, but
        // an unconfigured client must not get that far.
        let rawg = RawgClient::new(String::new()).with_base_url("http://127.0.0.1:9");
        let service = EnrichmentService::new(None, Some(Arc::new(rawg)));
        assert_eq!(service.enrich(&candidate).await, "");
    }
}
