//! Cache key builders for blog lookups.

/// Namespaced keys for every memoized blog query.
pub struct CacheKeys;

impl CacheKeys {
    pub const ALL_POSTS: &'static str = "all_posts";
    pub const ALL_TAGS: &'static str = "all_tags";

    pub fn post_by_number(number: u64) -> String {
        format!("post_{number}")
    }

    pub fn posts_by_tag(tag: &str) -> String {
        format!("posts_tag_{tag}")
    }
}
