//! Cache Entry Module
//!
//! Defines a single time-boxed cache entry holding a type-erased value.

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

/// Type-erased cached value, shared between the cache and its readers.
pub type CachedValue = Arc<dyn Any + Send + Sync>;

// == Cache Entry ==
/// Represents a single cache entry with value and expiry metadata.
#[derive(Clone)]
pub struct CacheEntry {
    /// The stored value, opaque to the cache
    pub value: CachedValue,
    /// Instant the entry was written
    pub stored_at: Instant,
    /// Duration after which the entry is considered stale
    pub ttl: Duration,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(value: CachedValue, ttl: Duration) -> Self {
        Self {
            value,
            stored_at: Instant::now(),
            ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry is stale at `now`.
    ///
    /// An entry stays visible while `now - stored_at <= ttl`, so it turns
    /// stale only once strictly more than `ttl` has elapsed.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.stored_at) > self.ttl
    }

    /// Checks if the entry is stale right now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    // == Typed Access ==
    /// Returns a clone of the value if it holds a `T`.
    pub fn downcast<T>(&self) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.value.downcast_ref::<T>().cloned()
    }
}

impl fmt::Debug for CacheEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("stored_at", &self.stored_at)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
