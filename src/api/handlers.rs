//! API Handlers
//!
//! HTTP request handlers for each blog endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::blog::{BlogPost, BlogService, GithubIssues, PostPage, PostTtls};
use crate::cache::{SharedCache, TimeBoxedCache};
use crate::config::Config;
use crate::error::{BlogError, Result};
use crate::models::requests::{DEFAULT_LIST_LIMIT, DEFAULT_RELATED_LIMIT};
use crate::models::{
    ClearResponse, HealthResponse, LimitQuery, PageQuery, PostsResponse, SearchQuery,
    StatsResponse, TagsResponse,
};

/// Application state shared across all handlers.
///
/// The blog service is cheap to clone; every clone shares one cache.
#[derive(Clone)]
pub struct AppState {
    pub blog: BlogService,
}

impl AppState {
    /// Creates a new AppState around the given service.
    pub fn new(blog: BlogService) -> Self {
        Self { blog }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the shared cache and a GitHub-backed service from the Config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = TimeBoxedCache::shared(config.default_ttl());
        let source = GithubIssues::new(config.github.clone())?;
        let blog = BlogService::new(cache, Arc::new(source), PostTtls::from_config(config));
        Ok(Self::new(blog))
    }

    /// Cache shared by every handler, handed to the sweep task.
    pub fn cache(&self) -> SharedCache {
        self.blog.cache().clone()
    }
}

/// Handler for GET /posts
pub async fn list_posts_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PostPage>> {
    let page = state.blog.paginated(query.page(), query.per_page()).await?;
    Ok(Json(page))
}

/// Handler for GET /posts/latest
pub async fn latest_posts_handler(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<PostsResponse>> {
    let posts = state.blog.latest(query.limit_or(DEFAULT_LIST_LIMIT)).await?;
    Ok(Json(PostsResponse::new(posts)))
}

/// Handler for GET /posts/popular
pub async fn popular_posts_handler(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<PostsResponse>> {
    let posts = state.blog.popular(query.limit_or(DEFAULT_LIST_LIMIT)).await?;
    Ok(Json(PostsResponse::new(posts)))
}

/// Handler for GET /posts/:number
pub async fn get_post_handler(
    State(state): State<AppState>,
    Path(number): Path<u64>,
) -> Result<Json<BlogPost>> {
    let post = state.blog.require_post(number).await?;
    Ok(Json(BlogPost::clone(&post)))
}

/// Handler for GET /posts/:number/related
pub async fn related_posts_handler(
    State(state): State<AppState>,
    Path(number): Path<u64>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<PostsResponse>> {
    let posts = state
        .blog
        .related(number, query.limit_or(DEFAULT_RELATED_LIMIT))
        .await?;
    Ok(Json(PostsResponse::new(posts)))
}

/// Handler for GET /tags
pub async fn tags_handler(State(state): State<AppState>) -> Result<Json<TagsResponse>> {
    let tags = state.blog.tag_stats().await?;
    Ok(Json(TagsResponse { tags }))
}

/// Handler for GET /tags/:tag
pub async fn tag_posts_handler(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Result<Json<PostsResponse>> {
    let posts = state.blog.posts_by_tag(&tag).await?;
    Ok(Json(PostsResponse::new(posts.to_vec())))
}

/// Handler for GET /search
///
/// Plain text queries run the simple search; anything with filters or
/// ordering runs the advanced search. Both read the cached listing.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<PostsResponse>> {
    if let Some(error_msg) = query.validate() {
        return Err(BlogError::InvalidRequest(error_msg));
    }

    let posts = if query.is_plain_text() {
        let text = query.q.unwrap_or_default();
        state.blog.search(&text).await?
    } else {
        state.blog.advanced_search(&query.into_options()).await?
    };

    Ok(Json(PostsResponse::new(posts)))
}

/// Handler for GET /cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.blog.cache_stats().await.into())
}

/// Handler for DELETE /cache
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let cleared = state.blog.invalidate().await;
    Json(ClearResponse::new(cleared))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
