//! Trait definition for search providers.
//!
//! This module defines the [`SearchProvider`] trait that every upstream
//! adapter (TMDB, Open Library, RAWG, Nominatim) implements. The trait splits
//! a fallible [`lookup`](SearchProvider::lookup) from an infallible
//! [`search`](SearchProvider::search): adapters report problems through
//! `Result`, and the provided `search` method turns every failure into an
//! empty list so nothing upstream ever sees an error.

use async_trait::async_trait;
use mediascout_common::{ProviderKey, Result};
use tracing::{debug, warn};

use super::candidate::CanonicalCandidate;

/// Async trait that all search adapters must implement.
///
/// Each adapter wraps a single external API and maps its payload onto
/// [`CanonicalCandidate`]s. Adapters hold only their injected configuration
/// and must not keep per-query state between calls.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Which content category this adapter serves.
    fn key(&self) -> ProviderKey;

    /// Returns `true` when the adapter has the credentials it needs.
    fn is_available(&self) -> bool {
        true
    }

    /// Query the upstream and map the response. Results are capped by the
    /// adapter's configured limit.
    async fn lookup(&self, query: &str) -> Result<Vec<CanonicalCandidate>>;

    /// Degrade-not-fail wrapper around [`lookup`](Self::lookup).
    ///
    /// An unavailable adapter returns an empty list without touching the
    /// network; any lookup error is logged and also yields an empty list.
    /// Missing credentials are expected and only logged at debug level.
    async fn search(&self, query: &str) -> Vec<CanonicalCandidate> {
        if !self.is_available() {
            debug!(provider = %self.key(), "Provider not configured; returning no results");
            return Vec::new();
        }

        match self.lookup(query).await {
            Ok(results) => {
                debug!(provider = %self.key(), count = results.len(), "Search completed");
                results
            }
            Err(e) if e.is_configuration() => {
                debug!(
                    provider = %self.key(),
                    error = %e,
                    "Provider not configured; returning no results"
                );
                Vec::new()
            }
            Err(e) => {
                warn!(
                    provider = %self.key(),
                    error = %e,
                    "Search failed; returning no results"
                );
                Vec::new()
            }
        }
    }
}
