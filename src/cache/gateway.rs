//! Typed access to the cache backend.
//!
//! The gateway owns the degrade-to-miss policy: a backend failure is logged
//! and reported as a miss on the read path, or swallowed on the write and
//! invalidation paths. Correctness never depends on the cache; the TTL is
//! the self-healing bound for the one staleness window (a crash between
//! store commit and invalidation).

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

use super::config::CacheConfig;
use super::keys::CacheKey;
use super::store::CacheBackend;

#[derive(Clone)]
pub struct CacheGateway {
    backend: Arc<dyn CacheBackend>,
    config: CacheConfig,
}

impl CacheGateway {
    pub fn new(backend: Arc<dyn CacheBackend>, config: CacheConfig) -> Self {
        Self { backend, config }
    }

    pub fn read_ttl(&self) -> Duration {
        self.config.read_ttl()
    }

    pub fn write_ttl(&self) -> Duration {
        self.config.write_ttl()
    }

    /// Fetch and deserialize a cached value. Any backend or decode failure
    /// is a miss.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        if !self.config.enabled {
            return None;
        }

        let raw = match self.backend.get(&key.to_string()).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(cache_key = %key, error = %err, "cache read failed, treating as miss");
                return None;
            }
        };

        match serde_json::from_slice(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(cache_key = %key, error = %err, "cached payload undecodable, treating as miss");
                None
            }
        }
    }

    /// Serialize and store a value under `key` with the given expiry.
    pub async fn put_json<T: Serialize>(&self, key: &CacheKey, value: &T, ttl: Duration) {
        if !self.config.enabled {
            return;
        }

        let raw = match serde_json::to_vec(value) {
            Ok(raw) => Bytes::from(raw),
            Err(err) => {
                warn!(cache_key = %key, error = %err, "cache serialization failed, skipping populate");
                return;
            }
        };

        if let Err(err) = self.backend.set(&key.to_string(), raw, ttl).await {
            warn!(cache_key = %key, error = %err, "cache populate failed");
        }
    }

    /// Best-effort removal of the given keys.
    pub async fn delete(&self, keys: &[CacheKey]) {
        if !self.config.enabled || keys.is_empty() {
            return;
        }

        let rendered: Vec<String> = keys.iter().map(CacheKey::to_string).collect();
        if let Err(err) = self.backend.delete(&rendered).await {
            warn!(cache_keys = ?rendered, error = %err, "cache invalidation failed, relying on ttl expiry");
        }
    }

    /// Best-effort flush of the whole cache.
    pub async fn flush_all(&self) {
        if !self.config.enabled {
            return;
        }

        if let Err(err) = self.backend.flush_all().await {
            warn!(error = %err, "cache flush failed, relying on ttl expiry");
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::cache::store::{CacheError, MemoryCache};
    use crate::domain::entities::EntityKind;

    /// Backend that fails every operation, standing in for a dead network
    /// cache.
    struct BrokenBackend;

    #[async_trait]
    impl CacheBackend for BrokenBackend {
        async fn get(&self, _key: &str) -> Result<Option<Bytes>, CacheError> {
            Err(CacheError::Backend("connection refused".to_string()))
        }

        async fn set(&self, _key: &str, _value: Bytes, _ttl: Duration) -> Result<(), CacheError> {
            Err(CacheError::Backend("connection refused".to_string()))
        }

        async fn delete(&self, _keys: &[String]) -> Result<(), CacheError> {
            Err(CacheError::Backend("connection refused".to_string()))
        }

        async fn flush_all(&self) -> Result<(), CacheError> {
            Err(CacheError::Backend("connection refused".to_string()))
        }
    }

    fn gateway(backend: Arc<dyn CacheBackend>) -> CacheGateway {
        CacheGateway::new(backend, CacheConfig::default())
    }

    #[tokio::test]
    async fn json_roundtrip_through_backend() {
        let gw = gateway(Arc::new(MemoryCache::new()));
        let key = CacheKey::detail(EntityKind::Menu, 1);

        gw.put_json(&key, &vec![1_i64, 2, 3], gw.read_ttl()).await;
        let hit: Option<Vec<i64>> = gw.get_json(&key).await;
        assert_eq!(hit, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn backend_failure_degrades_to_miss() {
        let gw = gateway(Arc::new(BrokenBackend));
        let key = CacheKey::list(EntityKind::Dish);

        gw.put_json(&key, &"ignored", gw.read_ttl()).await;
        let hit: Option<String> = gw.get_json(&key).await;
        assert!(hit.is_none());

        // Invalidation failures must not propagate either.
        gw.delete(&[key]).await;
        gw.flush_all().await;
    }

    #[tokio::test]
    async fn disabled_cache_never_hits() {
        let config = CacheConfig {
            enabled: false,
            ..Default::default()
        };
        let gw = CacheGateway::new(Arc::new(MemoryCache::new()), config);
        let key = CacheKey::detail(EntityKind::Dish, 9);

        gw.put_json(&key, &"value", Duration::from_secs(60)).await;
        let hit: Option<String> = gw.get_json(&key).await;
        assert!(hit.is_none());
    }
}
