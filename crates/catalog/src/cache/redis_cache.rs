use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisError};
use tracing::{debug, info};

use super::CacheStore;
use crate::CatalogError;

/// Redis-backed cache store; entries are written with `SET EX`
pub struct RedisCache {
    conn: ConnectionManager,
    ttl_seconds: u64,
}

impl RedisCache {
    /// Create new Redis cache
    pub async fn new(redis_url: &str, ttl_seconds: u64) -> Result<Self, CatalogError> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| CatalogError::CacheError(format!("Failed to create Redis client: {}", e)))?;

        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| CatalogError::CacheError(format!("Failed to connect to Redis: {}", e)))?;

        info!("Redis cache initialized with TTL: {} seconds", ttl_seconds);
        Ok(Self { conn, ttl_seconds })
    }

    /// Check if cache is available (health check)
    pub async fn ping(&self) -> Result<(), CatalogError> {
        let result: Result<String, RedisError> = redis::cmd("PING")
            .query_async(&mut self.conn.clone())
            .await;

        result
            .map(|_| ())
            .map_err(|e| CatalogError::CacheError(format!("Redis ping failed: {}", e)))
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CatalogError> {
        let value: Option<String> = self
            .conn
            .clone()
            .get(key)
            .await
            .map_err(|e| CatalogError::CacheError(format!("Redis GET {} failed: {}", key, e)))?;

        Ok(value)
    }

    async fn put(&self, key: &str, value: String) -> Result<(), CatalogError> {
        let result: Result<(), RedisError> = self
            .conn
            .clone()
            .set_ex(key, value, self.ttl_seconds)
            .await;

        result.map_err(|e| CatalogError::CacheError(format!("Redis SET {} failed: {}", key, e)))?;
        debug!("Cached value for key: {} with TTL: {}s", key, self.ttl_seconds);
        Ok(())
    }
}
