//! In-memory response cache using moka

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::future::Cache as MokaCache;
use moka::Expiry;

use crate::domain::cache::Cache;
use crate::domain::DomainError;

/// Configuration for the in-memory cache
#[derive(Debug, Clone)]
pub struct InMemoryCacheConfig {
    /// Maximum number of entries
    pub max_capacity: u64,
}

impl Default for InMemoryCacheConfig {
    fn default() -> Self {
        Self { max_capacity: 1_000 }
    }
}

impl InMemoryCacheConfig {
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    data: String,
    ttl: Duration,
}

/// Expires each entry after the TTL it was stored with
struct EntryTtl;

impl Expiry<String, CacheEntry> for EntryTtl {
    fn expire_after_create(&self, _key: &String, value: &CacheEntry, _created_at: Instant) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CacheEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Process-local cache shared by all request handlers
///
/// Entries are evicted once their TTL elapses or, when capacity is
/// reached, by moka's TinyLFU policy.
#[derive(Debug, Clone)]
pub struct InMemoryCache {
    cache: MokaCache<String, CacheEntry>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::with_config(InMemoryCacheConfig::default())
    }

    pub fn with_config(config: InMemoryCacheConfig) -> Self {
        let cache = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(EntryTtl)
            .build();

        Self { cache }
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.cache.get(key).await.map(|entry| entry.data))
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError> {
        if ttl.is_zero() {
            return Err(DomainError::cache("Cache TTL must be greater than zero"));
        }

        let entry = CacheEntry {
            data: value.to_string(),
            ttl,
        };

        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::CacheExt;

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = InMemoryCache::new();

        cache
            .set_raw("GET /api/briefing", "{\"markdown\":\"x\"}", Duration::from_secs(60))
            .await
            .unwrap();

        let result = cache.get_raw("GET /api/briefing").await.unwrap();
        assert_eq!(result.as_deref(), Some("{\"markdown\":\"x\"}"));
    }

    #[tokio::test]
    async fn test_get_missing() {
        let cache = InMemoryCache::new();
        assert!(cache.get_raw("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_entry_expires_after_its_own_ttl() {
        let cache = InMemoryCache::new();

        cache.set_raw("short", "\"a\"", Duration::from_millis(50)).await.unwrap();
        cache.set_raw("long", "\"b\"", Duration::from_secs(60)).await.unwrap();

        tokio::time::sleep(Duration::from_millis(120)).await;

        assert!(cache.get_raw("short").await.unwrap().is_none());
        assert_eq!(cache.get_raw("long").await.unwrap().as_deref(), Some("\"b\""));
    }

    #[tokio::test]
    async fn test_overwrite_replaces_value_and_ttl() {
        let cache = InMemoryCache::new();

        cache.set_raw("key", "\"old\"", Duration::from_millis(50)).await.unwrap();
        cache.set_raw("key", "\"new\"", Duration::from_secs(60)).await.unwrap();

        tokio::time::sleep(Duration::from_millis(120)).await;

        assert_eq!(cache.get_raw("key").await.unwrap().as_deref(), Some("\"new\""));
    }

    #[tokio::test]
    async fn test_zero_ttl_rejected() {
        let cache = InMemoryCache::new();

        let result = cache.set_raw("key", "\"v\"", Duration::ZERO).await;
        assert!(matches!(result, Err(DomainError::Cache { .. })));
    }

    #[tokio::test]
    async fn test_typed_values() {
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        struct Briefing {
            markdown: String,
            provider: String,
        }

        let cache = InMemoryCache::with_config(InMemoryCacheConfig::default().with_max_capacity(10));
        let briefing = Briefing {
            markdown: "## Summary".to_string(),
            provider: "cloudflare".to_string(),
        };

        cache.set("briefing", &briefing, Duration::from_secs(60)).await.unwrap();

        let result: Option<Briefing> = cache.get("briefing").await.unwrap();
        assert_eq!(result, Some(briefing));
    }
}
