//! Background Tasks Module
//!
//! Contains background tasks owned by the process lifecycle.
//!
//! # Tasks
//! - Cache sweep: evicts stale cache entries at the configured interval

mod sweep;

pub use sweep::spawn_sweep_task;
