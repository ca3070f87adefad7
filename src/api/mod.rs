//! API Module
//!
//! HTTP handlers and routing for the blog JSON API.
//!
//! # Endpoints
//! - `GET /posts` - Paginated posts
//! - `GET /posts/:number` - One post
//! - `GET /tags` - Label usage counts
//! - `GET /search` - Search posts
//! - `GET /cache/stats` - Cache snapshot
//! - `DELETE /cache` - Clear the cache
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
