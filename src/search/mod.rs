//! Search orchestration on top of the provider adapters.
//!
//! - [`aggregator`] -- Stateless gating and single-provider dispatch.
//! - [`selection`] -- Highlight state and keyboard contract.
//! - [`session`] -- Debounced, generation-guarded interactive session.
//! - [`handler`] -- Host commit callbacks.

pub mod aggregator;
pub mod handler;
pub mod selection;
pub mod session;

pub use aggregator::{Aggregator, SearchHint};
pub use handler::SelectionHandler;
pub use selection::{KeyOutcome, NavKey, SelectionController};
pub use session::{SearchPhase, SearchSession, SearchSnapshot};
