//! Cache trait definition

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Key-value response cache with per-entry TTL
///
/// Values are JSON strings so the trait stays dyn-compatible.
/// Use [`CacheExt`] for typed get/set operations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Cache: Send + Sync + Debug {
    /// Gets a raw JSON value from the cache
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Sets a raw JSON value in the cache with a TTL
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError>;
}

/// Extension trait providing typed get/set operations
pub trait CacheExt: Cache {
    /// Gets a typed value from the cache
    fn get<'a, V>(
        &'a self,
        key: &'a str,
    ) -> impl std::future::Future<Output = Result<Option<V>, DomainError>> + Send
    where
        V: DeserializeOwned + Send,
    {
        async move {
            match self.get_raw(key).await? {
                Some(data) => {
                    let value: V = serde_json::from_str(&data).map_err(|e| {
                        DomainError::cache(format!("Failed to deserialize cache value: {}", e))
                    })?;
                    Ok(Some(value))
                }
                None => Ok(None),
            }
        }
    }

    /// Sets a typed value in the cache with a TTL
    fn set<'a, V>(
        &'a self,
        key: &'a str,
        value: &'a V,
        ttl: Duration,
    ) -> impl std::future::Future<Output = Result<(), DomainError>> + Send
    where
        V: Serialize + Send + Sync,
    {
        async move {
            let data = serde_json::to_string(value).map_err(|e| {
                DomainError::cache(format!("Failed to serialize cache value: {}", e))
            })?;
            self.set_raw(key, &data, ttl).await
        }
    }
}

// Blanket implementation for all types implementing Cache
impl<T: Cache + ?Sized> CacheExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_typed_get_deserializes() {
        let mut cache = MockCache::new();
        cache
            .expect_get_raw()
            .returning(|_| Ok(Some("{\"markdown\":\"intel\"}".to_string())));

        let value: Option<serde_json::Value> = cache.get("key").await.unwrap();
        assert_eq!(value, Some(serde_json::json!({"markdown": "intel"})));
    }

    #[tokio::test]
    async fn test_typed_get_reports_corrupt_entries() {
        let mut cache = MockCache::new();
        cache
            .expect_get_raw()
            .returning(|_| Ok(Some("not json".to_string())));

        let result: Result<Option<serde_json::Value>, _> = cache.get("key").await;
        assert!(matches!(result, Err(DomainError::Cache { .. })));
    }

    #[tokio::test]
    async fn test_typed_set_serializes() {
        let mut cache = MockCache::new();
        cache
            .expect_set_raw()
            .withf(|key, value, ttl| {
                key == "key" && value == "[1,2]" && *ttl == Duration::from_secs(5)
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        cache.set("key", &vec![1, 2], Duration::from_secs(5)).await.unwrap();
    }
}
