//! Issue Blog - GitHub issues served as blog posts
//!
//! Fronts the issue tracker with a time-boxed memoization cache so a build
//! or request cycle makes a bounded number of upstream calls.

pub mod api;
pub mod blog;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_sweep_task;
