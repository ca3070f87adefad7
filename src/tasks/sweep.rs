//! Cache Sweep Task
//!
//! Background task that periodically evicts stale cache entries so memory
//! stays bounded even when nobody reads the stale keys.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns a background task that runs `cleanup()` on the cache every
/// `interval`.
///
/// The first sweep happens one full interval after spawning. The task loops
/// until it is aborted, so the owner must keep the handle and abort it at
/// shutdown.
///
/// # Arguments
/// * `cache` - Shared cache to sweep
/// * `interval` - Time between sweeps
///
/// # Example
/// ```ignore
/// let cache = TimeBoxedCache::shared(Duration::from_secs(300));
/// let sweep_handle = spawn_sweep_task(cache.clone(), Duration::from_secs(600));
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task(cache: SharedCache, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "Starting cache sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.write().await.cleanup();

            if removed > 0 {
                info!("Cache sweep: removed {} expired entries", removed);
            } else {
                debug!("Cache sweep: no expired entries found");
            }
        }
    })
}
