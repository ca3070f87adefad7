//! Cache Statistics Module
//!
//! Point-in-time snapshot of how many stored entries are still fresh.

use serde::Serialize;

// == Cache Stats ==
/// Non-authoritative snapshot of the cache contents.
///
/// `total` counts every stored entry, including stale ones that no read or
/// sweep has evicted yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of stored entries
    pub total: usize,
    /// Entries that a read would still return
    pub valid: usize,
    /// Entries that a read would evict
    pub expired: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Entry ==
    /// Counts one stored entry on the valid or expired side.
    pub fn record(&mut self, expired: bool) {
        self.total += 1;
        if expired {
            self.expired += 1;
        } else {
            self.valid += 1;
        }
    }

    // == Valid Ratio ==
    /// Share of stored entries that are still fresh, or 0.0 when empty.
    pub fn valid_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.valid as f64 / self.total as f64
        }
    }
}
