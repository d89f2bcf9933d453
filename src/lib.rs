//! Mediascout - external media discovery for movies, TV, books, games, and places
//!
//! The library maps a free-text query in one content domain onto a single
//! upstream catalogue and returns a uniform list of
//! [`CanonicalCandidate`](discovery::CanonicalCandidate)s. On top of that,
//! [`search::SearchSession`] drives an interactive search box with debounce,
//! stale-response protection, keyboard selection, and creator enrichment.

pub mod config;
pub mod discovery;
pub mod search;

pub use discovery::{CanonicalCandidate, Endpoints, SelectedCandidate};
pub use mediascout_common::{Error, ProviderKey};
pub use search::{Aggregator, SearchSession};
