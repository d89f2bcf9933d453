//! Domain router: host content-domain tokens ⇄ provider keys.
//!
//! The host application labels its records with a content domain
//! (`"movie"`, `"series"`, `"book"`, `"game"`, `"travel"`). The table below is
//! a fixed bijection between those tokens and the adapters that serve them.

use mediascout_common::ProviderKey;
use tracing::debug;

/// Provider used when a domain token is not recognised.
pub const DEFAULT_PROVIDER: ProviderKey = ProviderKey::Movie;

const DOMAIN_TABLE: [(&str, ProviderKey); 5] = [
    ("movie", ProviderKey::Movie),
    ("series", ProviderKey::Tv),
    ("book", ProviderKey::Book),
    ("game", ProviderKey::Game),
    ("travel", ProviderKey::Place),
];

/// Map a host content-domain token to the provider that serves it.
///
/// Matching ignores case and surrounding whitespace. Provider keys
/// themselves (`"tv"`, `"place"`) are accepted too. Anything else falls back
/// to [`DEFAULT_PROVIDER`].
pub fn provider_for_domain(token: &str) -> ProviderKey {
    let token = token.trim().to_ascii_lowercase();

    if let Some((_, key)) = DOMAIN_TABLE.iter().find(|(domain, _)| *domain == token) {
        return *key;
    }

    token.parse().unwrap_or_else(|_| {
        debug!(token = %token, fallback = %DEFAULT_PROVIDER, "Unknown content domain");
        DEFAULT_PROVIDER
    })
}

/// Map a provider back to the content-domain token the host uses for it.
pub fn domain_for_provider(key: ProviderKey) -> &'static str {
    DOMAIN_TABLE
        .iter()
        .find(|(_, k)| *k == key)
        .map(|(domain, _)| *domain)
        .unwrap_or("movie")
}

/// The full routing table, for display.
pub fn table() -> &'static [(&'static str, ProviderKey)] {
    &DOMAIN_TABLE
}
