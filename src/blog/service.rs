//! Blog Service
//!
//! Answers every blog query. Upstream lookups are memoized in the shared
//! time-boxed cache; derived views are computed from the cached listing.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};

use crate::blog::post::BlogPost;
use crate::blog::query::{self, AdvancedSearchOptions, PostPage, TagStat};
use crate::blog::source::PostSource;
use crate::cache::{CacheKeys, CacheStats, Memoized, SharedCache};
use crate::config::Config;
use crate::error::{BlogError, Result};

/// Largest page size a caller may request
pub const MAX_PER_PAGE: usize = 100;

type Posts = Arc<Vec<BlogPost>>;

/// Cache lifetimes for the memoized lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostTtls {
    /// Listings, tag lists and tag lookups
    pub posts: Duration,
    /// Single post lookups
    pub post: Duration,
}

impl PostTtls {
    pub fn from_config(config: &Config) -> Self {
        Self {
            posts: config.posts_ttl(),
            post: config.post_ttl(),
        }
    }
}

impl Default for PostTtls {
    fn default() -> Self {
        Self {
            posts: Duration::from_secs(10 * 60),
            post: Duration::from_secs(15 * 60),
        }
    }
}

// == Blog Service ==
/// Cached access to the posts of one source.
#[derive(Clone)]
pub struct BlogService {
    cache: SharedCache,
    all_posts: Memoized<(), Posts, BlogError>,
    post_by_number: Memoized<u64, Option<Arc<BlogPost>>, BlogError>,
    all_tags: Memoized<(), Arc<Vec<String>>, BlogError>,
    posts_by_tag: Memoized<String, Posts, BlogError>,
}

impl BlogService {
    // == Constructor ==
    /// Builds the memoized lookups over `source`, all sharing `cache`.
    pub fn new(cache: SharedCache, source: Arc<dyn PostSource>, ttls: PostTtls) -> Self {
        let all_posts = memoize_listing(&cache, ttls.posts, source.clone());
        let post_by_number = memoize_single(&cache, ttls.post, source);

        let all_tags = derive(
            &cache,
            ttls.posts,
            &all_posts,
            |_: &()| CacheKeys::ALL_TAGS.to_string(),
            |posts, _| query::all_tags(posts),
        );
        let posts_by_tag = derive(
            &cache,
            ttls.posts,
            &all_posts,
            |tag: &String| CacheKeys::posts_by_tag(tag),
            |posts, tag: String| query::with_tag(posts, &tag),
        );

        Self {
            cache,
            all_posts,
            post_by_number,
            all_tags,
            posts_by_tag,
        }
    }

    /// Shared cache backing this service.
    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    // == Memoized Lookups ==
    /// All published posts, newest first.
    pub async fn all_posts(&self) -> Result<Posts> {
        self.all_posts.call(()).await
    }

    /// One post by issue number, or `None` if it does not exist.
    pub async fn post_by_number(&self, number: u64) -> Result<Option<Arc<BlogPost>>> {
        self.post_by_number.call(number).await
    }

    /// Like `post_by_number`, but a missing post is an error.
    pub async fn require_post(&self, number: u64) -> Result<Arc<BlogPost>> {
        self.post_by_number(number)
            .await?
            .ok_or_else(|| BlogError::NotFound(format!("Post {number} not found")))
    }

    /// Sorted unique labels.
    pub async fn all_tags(&self) -> Result<Arc<Vec<String>>> {
        self.all_tags.call(()).await
    }

    /// Posts carrying `tag`.
    pub async fn posts_by_tag(&self, tag: &str) -> Result<Posts> {
        self.posts_by_tag.call(tag.to_string()).await
    }

    // == Derived Views ==
    /// Case-insensitive search over title, body and labels.
    ///
    /// Computed from the cached listing on every call; results are not
    /// stored per query.
    pub async fn search(&self, query: &str) -> Result<Vec<BlogPost>> {
        Ok(query::search(&self.all_posts().await?, query))
    }

    pub async fn advanced_search(&self, options: &AdvancedSearchOptions) -> Result<Vec<BlogPost>> {
        let posts = self.all_posts().await?;
        Ok(query::advanced_search(&posts, options, Utc::now()))
    }

    /// One 1-based page of the listing.
    pub async fn paginated(&self, page: usize, per_page: usize) -> Result<PostPage> {
        if page == 0 {
            return Err(BlogError::InvalidRequest("page starts at 1".to_string()));
        }
        if per_page == 0 || per_page > MAX_PER_PAGE {
            return Err(BlogError::InvalidRequest(format!(
                "per_page must be between 1 and {MAX_PER_PAGE}"
            )));
        }

        let posts = self.all_posts().await?;
        Ok(query::paginate(&posts, page, per_page))
    }

    /// Posts sharing the most labels with post `number`.
    pub async fn related(&self, number: u64, limit: usize) -> Result<Vec<BlogPost>> {
        let current = self.require_post(number).await?;
        let posts = self.all_posts().await?;
        Ok(query::related(&posts, &current, limit))
    }

    pub async fn latest(&self, limit: usize) -> Result<Vec<BlogPost>> {
        Ok(query::latest(&self.all_posts().await?, limit))
    }

    pub async fn popular(&self, limit: usize) -> Result<Vec<BlogPost>> {
        Ok(query::popular(&self.all_posts().await?, limit))
    }

    pub async fn tag_stats(&self) -> Result<Vec<TagStat>> {
        Ok(query::tag_stats(&self.all_posts().await?))
    }

    // == Cache Maintenance ==
    /// Snapshot of the shared cache.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    /// Drops every cached result so the next lookups refetch.
    ///
    /// Returns how many entries were dropped.
    pub async fn invalidate(&self) -> usize {
        let mut cache = self.cache.write().await;
        let dropped = cache.len();
        cache.clear();
        info!("Cache invalidated: dropped {} entries", dropped);
        dropped
    }
}

fn memoize_listing(
    cache: &SharedCache,
    ttl: Duration,
    source: Arc<dyn PostSource>,
) -> Memoized<(), Posts, BlogError> {
    Memoized::new(
        cache.clone(),
        ttl,
        |_: &()| CacheKeys::ALL_POSTS.to_string(),
        move |_: ()| {
            let source = source.clone();
            async move {
                let posts = source.list_posts().await.map_err(|e| {
                    warn!("Listing posts failed: {}", e);
                    e
                })?;
                info!("Fetched {} posts from source", posts.len());
                Ok::<_, BlogError>(Arc::new(posts))
            }
        },
    )
}

fn memoize_single(
    cache: &SharedCache,
    ttl: Duration,
    source: Arc<dyn PostSource>,
) -> Memoized<u64, Option<Arc<BlogPost>>, BlogError> {
    Memoized::new(
        cache.clone(),
        ttl,
        |number: &u64| CacheKeys::post_by_number(*number),
        move |number: u64| {
            let source = source.clone();
            async move { Ok::<_, BlogError>(source.get_post(number).await?.map(Arc::new)) }
        },
    )
}

/// Memoizes a view computed from the cached listing.
fn derive<A, R, K, F>(
    cache: &SharedCache,
    ttl: Duration,
    listing: &Memoized<(), Posts, BlogError>,
    key_of: K,
    compute: F,
) -> Memoized<A, Arc<R>, BlogError>
where
    A: Send + 'static,
    R: Send + Sync + 'static,
    K: Fn(&A) -> String + Send + Sync + 'static,
    F: Fn(&[BlogPost], A) -> R + Send + Sync + 'static,
{
    let listing = listing.clone();
    let compute = Arc::new(compute);
    Memoized::new(cache.clone(), ttl, key_of, move |args: A| {
        let listing = listing.clone();
        let compute = compute.clone();
        async move {
            let posts = listing.call(()).await?;
            Ok::<_, BlogError>(Arc::new(compute(posts.as_slice(), args)))
        }
    })
}
