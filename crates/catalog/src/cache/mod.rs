pub mod memory_cache;
pub mod redis_cache;

pub use memory_cache::{InMemoryCache, DEFAULT_MAX_ENTRIES};
pub use redis_cache::RedisCache;

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use common::metrics;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::CatalogError;

/// Raw key/value storage behind the catalog caches. Entries expire after the
/// store's TTL; nothing is evicted explicitly.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CatalogError>;

    async fn put(&self, key: &str, value: String) -> Result<(), CatalogError>;
}

/// Named caches used by the beer service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheName {
    BeerList,
    Beer,
    BeerUpc,
}

impl CacheName {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheName::BeerList => "beerListCache",
            CacheName::Beer => "beerCache",
            CacheName::BeerUpc => "beerUpcCache",
        }
    }

    fn key(&self, key: &str) -> String {
        format!("{}::{}", self.as_str(), key)
    }
}

/// Typed read-through cache over a [`CacheStore`].
///
/// Any store or serialization fault is logged and treated as a miss, so a
/// broken cache only costs a trip to storage.
#[derive(Clone)]
pub struct CatalogCache {
    store: Arc<dyn CacheStore>,
}

impl CatalogCache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Get value from cache
    pub async fn get<T: DeserializeOwned>(&self, cache: CacheName, key: &str) -> Option<T> {
        let cache_key = cache.key(key);

        let cached = match self.store.get(&cache_key).await {
            Ok(cached) => cached,
            Err(e) => {
                warn!("Cache read failed for {}: {}", cache_key, e);
                None
            }
        };

        let value = cached.and_then(|raw| match serde_json::from_str::<T>(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Failed to deserialize cached value for {}: {}", cache_key, e);
                None
            }
        });

        metrics::record_cache_request(cache.as_str(), value.is_some());
        if value.is_some() {
            debug!("Cache hit for key: {}", cache_key);
        } else {
            debug!("Cache miss for key: {}", cache_key);
        }

        value
    }

    /// Set value in cache
    pub async fn put<T: Serialize>(&self, cache: CacheName, key: &str, value: &T) {
        let cache_key = cache.key(key);

        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize value for cache key {}: {}", cache_key, e);
                return;
            }
        };

        if let Err(e) = self.store.put(&cache_key, json).await {
            warn!("Cache write failed for {}: {}", cache_key, e);
        }
    }

    /// Return the cached value for `key`, or run `compute` and cache its
    /// result. Compute errors propagate and are not cached.
    pub async fn get_or_compute<T, F, Fut>(
        &self,
        cache: CacheName,
        key: &str,
        compute: F,
    ) -> Result<T, CatalogError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, CatalogError>>,
    {
        if let Some(cached) = self.get::<T>(cache, key).await {
            return Ok(cached);
        }

        let value = compute().await?;
        self.put(cache, key, &value).await;
        Ok(value)
    }

    /// Like [`CatalogCache::get_or_compute`] for lookups that may find
    /// nothing. Absent results are not cached.
    pub async fn get_or_load<T, F, Fut>(
        &self,
        cache: CacheName,
        key: &str,
        load: F,
    ) -> Result<Option<T>, CatalogError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<T>, CatalogError>>,
    {
        if let Some(cached) = self.get::<T>(cache, key).await {
            return Ok(Some(cached));
        }

        let loaded = load().await?;
        if let Some(value) = &loaded {
            self.put(cache, key, value).await;
        }

        Ok(loaded)
    }
}
