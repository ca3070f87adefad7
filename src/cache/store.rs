//! Cache Store Module
//!
//! Time-boxed cache engine: a HashMap of type-erased entries with lazy
//! eviction on read.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats};

/// Cache handle shared between the service, the API and the sweep task.
pub type SharedCache = Arc<RwLock<TimeBoxedCache>>;

// == Time Boxed Cache ==
/// Keyed store where every entry carries its own expiry deadline.
#[derive(Debug)]
pub struct TimeBoxedCache {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// TTL applied by `set_default`
    default_ttl: Duration,
}

impl TimeBoxedCache {
    // == Constructor ==
    /// Creates an empty cache.
    ///
    /// # Arguments
    /// * `default_ttl` - TTL used by `set_default`
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            default_ttl,
        }
    }

    /// Wraps a new cache in the shared handle.
    pub fn shared(default_ttl: Duration) -> SharedCache {
        Arc::new(RwLock::new(Self::new(default_ttl)))
    }

    /// Returns the TTL used by `set_default`.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // == Set ==
    /// Stores a value under `key`, replacing any existing entry.
    pub fn set<T>(&mut self, key: impl Into<String>, value: T, ttl: Duration)
    where
        T: Send + Sync + 'static,
    {
        let entry = CacheEntry::new(Arc::new(value), ttl);
        self.entries.insert(key.into(), entry);
    }

    /// Stores a value with the configured default TTL.
    pub fn set_default<T>(&mut self, key: impl Into<String>, value: T)
    where
        T: Send + Sync + 'static,
    {
        let ttl = self.default_ttl;
        self.set(key, value, ttl);
    }

    // == Get ==
    /// Returns the stored value if present and fresh.
    ///
    /// A stale entry is removed as a side effect. A fresh entry of another
    /// type is reported as absent and left untouched.
    pub fn get<T>(&mut self, key: &str) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.fresh_entry(key)?.downcast::<T>()
    }

    // == Has ==
    /// Same staleness check and eviction as `get`, without the value.
    pub fn has(&mut self, key: &str) -> bool {
        self.fresh_entry(key).is_some()
    }

    // == Delete ==
    /// Removes an entry by key. Returns true if one existed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Clear ==
    /// Removes every entry unconditionally.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Stats ==
    /// Counts stored entries by freshness without evicting anything.
    pub fn stats(&self) -> CacheStats {
        let now = Instant::now();
        self.entries
            .values()
            .fold(CacheStats::new(), |mut stats, entry| {
                stats.record(entry.is_expired_at(now));
                stats
            })
    }

    // == Cleanup ==
    /// Evicts every stale entry.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup(&mut self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        before - self.entries.len()
    }

    // == Length ==
    /// Returns the number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn fresh_entry(&mut self, key: &str) -> Option<&CacheEntry> {
        if self.entries.get(key)?.is_expired() {
            self.entries.remove(key);
            debug!(key, "evicted stale cache entry on read");
            return None;
        }
        self.entries.get(key)
    }
}

impl Default for TimeBoxedCache {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::cache::DEFAULT_TTL_MS))
    }
}
