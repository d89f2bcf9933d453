//! Provider registry mapping each [`ProviderKey`] to its [`SearchProvider`].
//!
//! Unlike a merge-everything registry, the aggregator queries exactly one
//! adapter per search: the one the active content domain routes to. The
//! registry only answers "which adapter serves this key".

use std::sync::Arc;

use mediascout_common::ProviderKey;

use super::provider::SearchProvider;

/// A registry holding at most one [`SearchProvider`] per [`ProviderKey`].
///
/// # Examples
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use mediascout::discovery::ProviderRegistry;
///
/// let mut registry = ProviderRegistry::new();
/// registry.register(Arc::new(my_book_provider));
///
/// let results = registry.get(ProviderKey::Book).unwrap().search("dune").await;
/// ```
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn SearchProvider>>,
}

impl ProviderRegistry {
    /// Create an empty registry with no providers.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Register a provider, replacing any earlier one with the same key.
    pub fn register(&mut self, provider: Arc<dyn SearchProvider>) {
        let key = provider.key();
        self.providers.retain(|p| p.key() != key);
        self.providers.push(provider);
    }

    /// Look up the provider serving `key`.
    pub fn get(&self, key: ProviderKey) -> Option<&dyn SearchProvider> {
        self.providers
            .iter()
            .find(|p| p.key() == key)
            .map(|p| p.as_ref())
    }

    /// Return references to all providers that are currently available
    /// (i.e. configured with the credentials they need).
    pub fn available(&self) -> Vec<&dyn SearchProvider> {
        self.providers
            .iter()
            .filter(|p| p.is_available())
            .map(|p| p.as_ref())
            .collect()
    }

    /// Keys of every registered provider, in registration order.
    pub fn keys(&self) -> Vec<ProviderKey> {
        self.providers.iter().map(|p| p.key()).collect()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
