//! Concrete search adapter implementations.
//!
//! Each submodule wraps a single external API and implements the
//! [`SearchProvider`](super::SearchProvider) trait.

pub mod nominatim;
pub mod openlibrary;
pub mod rawg;
pub mod tmdb;

pub use nominatim::NominatimProvider;
pub use openlibrary::OpenLibraryProvider;
pub use rawg::{RawgClient, RawgProvider};
pub use tmdb::{TmdbClient, TmdbMedia, TmdbProvider};
