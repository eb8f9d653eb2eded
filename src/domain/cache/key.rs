//! Cache key generation for request-scoped responses

use std::collections::BTreeMap;
use std::fmt::Debug;

/// Trait for generating cache keys from request identity
pub trait CacheKeyGenerator: Send + Sync + Debug {
    /// Generates a cache key from the given components
    fn generate(&self, params: &CacheKeyParams) -> String;

    /// Generates a key with a namespace prefix
    fn generate_with_namespace(&self, namespace: &str, params: &CacheKeyParams) -> String {
        format!("{}:{}", namespace, self.generate(params))
    }
}

/// Parameters for cache key generation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheKeyParams {
    /// Primary identifier, e.g. `GET /api/briefing?provider=hf`
    pub primary: String,
    /// Secondary components (sorted for consistency)
    pub components: BTreeMap<String, String>,
}

impl CacheKeyParams {
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            components: BTreeMap::new(),
        }
    }

    /// Identity of an inbound request: method and full URI
    pub fn for_request(method: &str, uri: &str) -> Self {
        Self::new(format!("{} {}", method.to_ascii_uppercase(), uri))
    }

    pub fn with_component(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.components.insert(key.into(), value.into());
        self
    }
}

/// Readable `primary:key=value:...` keys
#[derive(Debug, Clone, Default)]
pub struct DefaultKeyGenerator;

impl DefaultKeyGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl CacheKeyGenerator for DefaultKeyGenerator {
    fn generate(&self, params: &CacheKeyParams) -> String {
        let mut parts = vec![params.primary.clone()];

        for (k, v) in &params.components {
            parts.push(format!("{}={}", k, v));
        }

        parts.join(":")
    }
}
