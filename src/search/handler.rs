//! Host callbacks for committed candidates.

use async_trait::async_trait;

use crate::discovery::{CanonicalCandidate, SelectedCandidate};

/// Receives the two commit verbs a [`SearchSession`](super::SearchSession)
/// exposes.
///
/// `on_select` is the primary commit and always receives an enriched
/// candidate. `on_action` is an optional, independent secondary commit
/// (e.g. "add to list"); hosts that offer one override both
/// [`supports_action`](Self::supports_action) and `on_action`.
#[async_trait]
pub trait SelectionHandler: Send + Sync {
    async fn on_select(&self, selected: SelectedCandidate);

    fn supports_action(&self) -> bool {
        false
    }

    async fn on_action(&self, _candidate: CanonicalCandidate) -> anyhow::Result<()> {
        Ok(())
    }
}
