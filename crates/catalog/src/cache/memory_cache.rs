use std::num::NonZeroUsize;
use std::time::Duration;

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::info;

use super::CacheStore;
use crate::CatalogError;

pub const DEFAULT_MAX_ENTRIES: usize = 10_000;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    inserted_at: Instant,
}

/// Process-local cache with a single time-to-live for every entry.
///
/// Holds at most `max_entries` entries, evicting the least recently used one
/// when full. Expired entries are dropped when read, and writes purge expired
/// entries from the least recently used end.
#[derive(Debug)]
pub struct InMemoryCache {
    entries: RwLock<LruCache<String, CacheEntry>>,
    ttl: Duration,
}

impl InMemoryCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, DEFAULT_MAX_ENTRIES)
    }

    /// A zero capacity falls back to [`DEFAULT_MAX_ENTRIES`]
    pub fn with_capacity(ttl: Duration, max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries)
            .or(NonZeroUsize::new(DEFAULT_MAX_ENTRIES))
            .unwrap_or(NonZeroUsize::MIN);

        info!(
            "In-memory cache initialized with TTL: {} seconds, capacity: {}",
            ttl.as_secs(),
            capacity
        );
        Self {
            entries: RwLock::new(LruCache::new(capacity)),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn capacity(&self) -> usize {
        self.entries.read().await.cap().get()
    }

    /// Drop every entry
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    fn is_live(&self, entry: &CacheEntry) -> bool {
        entry.inserted_at.elapsed() < self.ttl
    }
}

#[async_trait]
impl CacheStore for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CatalogError> {
        let mut entries = self.entries.write().await;

        let value = match entries.get(key) {
            None => return Ok(None),
            Some(entry) if self.is_live(entry) => Some(entry.value.clone()),
            Some(_) => None,
        };

        if value.is_none() {
            entries.pop(key);
        }
        Ok(value)
    }

    async fn put(&self, key: &str, value: String) -> Result<(), CatalogError> {
        let mut entries = self.entries.write().await;

        while let Some((_, oldest)) = entries.peek_lru() {
            if self.is_live(oldest) {
                break;
            }
            entries.pop_lru();
        }

        entries.put(
            key.to_string(),
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
        Ok(())
    }
}
