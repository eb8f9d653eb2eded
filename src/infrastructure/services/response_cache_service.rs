//! Shared response caching for idempotent endpoints

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderMap;
use serde::{de::DeserializeOwned, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::cache::{Cache, CacheExt, CacheKeyGenerator, CacheKeyParams, DefaultKeyGenerator};

/// Configuration for response caching
#[derive(Debug, Clone)]
pub struct ResponseCacheConfig {
    /// Namespace prefix for cache keys
    pub namespace: String,
    /// Freshness window at the shared layer
    pub ttl: Duration,
    /// Request headers whose values are part of the key
    pub vary_headers: Vec<String>,
    pub enabled: bool,
}

impl Default for ResponseCacheConfig {
    fn default() -> Self {
        Self {
            namespace: "responses".to_string(),
            ttl: Duration::from_secs(7200),
            vary_headers: vec!["accept".to_string()],
            enabled: true,
        }
    }
}

impl ResponseCacheConfig {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_vary_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vary_headers = headers
            .into_iter()
            .map(|h| h.into().to_ascii_lowercase())
            .collect();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Read-through cache keyed by request identity
///
/// Lookups and writes never fail the caller: cache errors are logged and
/// treated as misses. Writes run on a spawned task.
#[derive(Debug, Clone)]
pub struct ResponseCacheService {
    cache: Arc<dyn Cache>,
    config: ResponseCacheConfig,
    key_generator: DefaultKeyGenerator,
}

impl ResponseCacheService {
    pub fn new(cache: Arc<dyn Cache>, config: ResponseCacheConfig) -> Self {
        Self {
            cache,
            config,
            key_generator: DefaultKeyGenerator::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// `cache-control` value for cacheable responses: shared caches only
    pub fn cache_control(&self) -> String {
        format!("public, max-age=0, s-maxage={}", self.config.ttl.as_secs())
    }

    /// Key from method, full URI and the configured vary headers
    pub fn key_for(&self, method: &str, uri: &str, headers: &HeaderMap) -> String {
        let params = self
            .config
            .vary_headers
            .iter()
            .fold(CacheKeyParams::for_request(method, uri), |params, name| {
                let value = headers
                    .get(name.as_str())
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("");
                params.with_component(name.clone(), value)
            });

        self.key_generator
            .generate_with_namespace(&self.config.namespace, &params)
    }

    pub async fn get<V>(&self, key: &str) -> Option<V>
    where
        V: DeserializeOwned + Send,
    {
        if !self.config.enabled {
            return None;
        }

        match self.cache.get::<V>(key).await {
            Ok(Some(value)) => {
                debug!(key, "Response cache hit");
                Some(value)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(key, error = %e, "Response cache lookup failed");
                None
            }
        }
    }

    /// Stores `value` without blocking the caller
    ///
    /// Returns the write task, or `None` when caching is disabled.
    pub fn store<V>(&self, key: String, value: V) -> Option<JoinHandle<()>>
    where
        V: Serialize + Send + Sync + 'static,
    {
        if !self.config.enabled {
            return None;
        }

        let cache = self.cache.clone();
        let ttl = self.config.ttl;

        Some(tokio::spawn(async move {
            if let Err(e) = cache.set(&key, &value, ttl).await {
                warn!(key = %key, error = %e, "Response cache write failed");
            }
        }))
    }
}
