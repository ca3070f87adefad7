//! Request and Response models for the blog API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! deserializing query strings and serializing HTTP response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{LimitQuery, PageQuery, SearchQuery};
pub use responses::{
    ClearResponse, ErrorResponse, HealthResponse, PostsResponse, StatsResponse, TagsResponse,
};
