//! Cache Module
//!
//! Provides the time-boxed in-memory cache and the memoizing wrapper that
//! fronts issue tracker lookups.

mod entry;
mod keys;
mod memoize;
mod stats;
mod store;


// Re-export public types
pub use entry::{CacheEntry, CachedValue};
pub use keys::CacheKeys;
pub use memoize::{Memoized, ProducerFuture};
pub use stats::CacheStats;
pub use store::{SharedCache, TimeBoxedCache};

// == Public Constants ==
/// TTL used when none is configured (5 minutes)
pub const DEFAULT_TTL_MS: u64 = 5 * 60 * 1000;

/// Interval between background sweeps when none is configured (10 minutes)
pub const DEFAULT_SWEEP_INTERVAL_MS: u64 = 10 * 60 * 1000;
