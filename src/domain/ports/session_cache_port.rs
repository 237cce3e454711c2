//! Port for the tab-scoped attachment cache.

use async_trait::async_trait;

use crate::domain::errors::ResolveError;

/// Key prefix of cached attachment records.
pub const CACHE_KEY_PREFIX: &str = "redmine_glightbox_attachment_";

/// String key/value store that lives as long as the browsing session.
///
/// Entries are trusted without revalidation and never expire on their own.
/// Writes are last-write-wins.
#[async_trait]
pub trait SessionCachePort: Send + Sync {
    /// Returns the raw value stored under `key`.
    async fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`.
    async fn set(&self, key: &str, value: String) -> Result<(), ResolveError>;

    /// Number of stored entries.
    fn len(&self) -> usize;

    /// Returns true if nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
