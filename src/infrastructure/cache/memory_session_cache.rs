//! In-memory LRU session cache.

use std::num::NonZeroUsize;

use async_trait::async_trait;
use lru::LruCache;
use parking_lot::Mutex;
use tracing::trace;

use crate::domain::errors::ResolveError;
use crate::domain::ports::SessionCachePort;

/// Default maximum number of cached attachment records.
pub const DEFAULT_CACHE_SIZE: usize = 512;

/// Session cache kept in process memory; cleared when the process exits.
pub struct MemorySessionCache {
    entries: Mutex<LruCache<String, String>>,
}

impl MemorySessionCache {
    /// Creates a new cache with the specified capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(cap)),
        }
    }
}

impl Default for MemorySessionCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_SIZE)
    }
}

#[async_trait]
impl SessionCachePort for MemorySessionCache {
    async fn get(&self, key: &str) -> Option<String> {
        let value = self.entries.lock().get(key).cloned();
        trace!(key, hit = value.is_some(), "Session cache lookup");
        value
    }

    async fn set(&self, key: &str, value: String) -> Result<(), ResolveError> {
        self.entries.lock().put(key.to_string(), value);
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_set_and_get() {
        let cache = MemorySessionCache::new(10);
        cache.set("a", "1".to_string()).await.unwrap();

        assert_eq!(cache.get("a").await.as_deref(), Some("1"));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let cache = MemorySessionCache::new(10);
        cache.set("a", "1".to_string()).await.unwrap();
        cache.set("a", "2".to_string()).await.unwrap();

        assert_eq!(cache.get("a").await.as_deref(), Some("2"));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_cache_eviction() {
        let cache = MemorySessionCache::new(2);
        cache.set("a", "1".to_string()).await.unwrap();
        cache.set("b", "2".to_string()).await.unwrap();
        cache.set("c", "3".to_string()).await.unwrap();

        assert!(cache.get("a").await.is_none());
        assert!(cache.get("b").await.is_some());
        assert!(cache.get("c").await.is_some());
    }
}
