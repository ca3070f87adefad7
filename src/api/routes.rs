//! API Routes
//!
//! Configures the Axum router with all blog endpoints.

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_cache_handler, get_post_handler, health_handler, latest_posts_handler,
    list_posts_handler, popular_posts_handler, related_posts_handler, search_handler,
    stats_handler, tag_posts_handler, tags_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /posts` - Paginated posts
/// - `GET /posts/latest`, `GET /posts/popular` - Listing views
/// - `GET /posts/:number` - One post
/// - `GET /posts/:number/related` - Posts sharing labels with one post
/// - `GET /tags` - Label usage counts
/// - `GET /tags/:tag` - Posts carrying a label
/// - `GET /search` - Text and filtered search
/// - `GET /cache/stats` - Cache snapshot
/// - `DELETE /cache` - Drop every cached result
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/posts", get(list_posts_handler))
        .route("/posts/latest", get(latest_posts_handler))
        .route("/posts/popular", get(popular_posts_handler))
        .route("/posts/:number", get(get_post_handler))
        .route("/posts/:number/related", get(related_posts_handler))
        .route("/tags", get(tags_handler))
        .route("/tags/:tag", get(tag_posts_handler))
        .route("/search", get(search_handler))
        .route("/cache/stats", get(stats_handler))
        .route("/cache", delete(clear_cache_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
