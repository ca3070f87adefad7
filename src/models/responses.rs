//! Response DTOs for the blog API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::blog::{BlogPost, TagStat};
use crate::cache::CacheStats;

/// Response body for post listings
#[derive(Debug, Clone, Serialize)]
pub struct PostsResponse {
    /// Number of posts returned
    pub total: usize,
    pub posts: Vec<BlogPost>,
}

impl PostsResponse {
    pub fn new(posts: Vec<BlogPost>) -> Self {
        Self {
            total: posts.len(),
            posts,
        }
    }
}

/// Response body for `GET /tags`
#[derive(Debug, Clone, Serialize)]
pub struct TagsResponse {
    pub tags: Vec<TagStat>,
}

/// Response body for the cache stats endpoint (GET /cache/stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Stored entries, stale ones included
    pub total: usize,
    /// Entries a read would return
    pub valid: usize,
    /// Entries a read or sweep would evict
    pub expired: usize,
    /// valid / total
    pub valid_ratio: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            total: stats.total,
            valid: stats.valid,
            expired: stats.expired,
            valid_ratio: stats.valid_ratio(),
        }
    }
}

/// Response body for the cache clear endpoint (DELETE /cache)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
    /// Number of entries dropped
    pub cleared: usize,
}

impl ClearResponse {
    pub fn new(cleared: usize) -> Self {
        Self {
            message: format!("Cleared {} cache entries", cleared),
            cleared,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
