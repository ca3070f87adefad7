//! Request DTOs for the blog API
//!
//! Query string parameters accepted by the listing and search endpoints.

use serde::Deserialize;

use crate::blog::{AdvancedSearchOptions, DateRange, SortBy, SortOrder};

/// Default page size for `GET /posts`
pub const DEFAULT_PER_PAGE: usize = 10;
/// Default size of the latest/popular listings
pub const DEFAULT_LIST_LIMIT: usize = 5;
/// Default number of related posts
pub const DEFAULT_RELATED_LIMIT: usize = 3;

/// Query for `GET /posts`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    /// 1-based page number (default: 1)
    #[serde(default)]
    pub page: Option<usize>,
    /// Posts per page (default: 10)
    #[serde(default)]
    pub per_page: Option<usize>,
}

impl PageQuery {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1)
    }

    pub fn per_page(&self) -> usize {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE)
    }
}

/// Query for the listing views that take a size
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LimitQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

impl LimitQuery {
    pub fn limit_or(&self, default: usize) -> usize {
        self.limit.unwrap_or(default)
    }
}

/// Query for `GET /search`
///
/// # Fields
/// - `q`: text to look for
/// - `tags`: comma-separated labels, any of which must match
/// - `range`: `all`, `week`, `month` or `year`
/// - `sort`: `date`, `title` or `comments`
/// - `order`: `asc` or `desc`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub range: Option<DateRange>,
    #[serde(default)]
    pub sort: Option<SortBy>,
    #[serde(default)]
    pub order: Option<SortOrder>,
}

impl SearchQuery {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        match &self.q {
            Some(q) if q.chars().count() > 256 => {
                Some("Query exceeds maximum length of 256 characters".to_string())
            }
            _ => None,
        }
    }

    /// True when the request only carries a text query, which can be served
    /// from the memoized search.
    pub fn is_plain_text(&self) -> bool {
        self.q.is_some()
            && self.tags.is_none()
            && self.range.is_none()
            && self.sort.is_none()
            && self.order.is_none()
    }

    pub fn into_options(self) -> AdvancedSearchOptions {
        AdvancedSearchOptions {
            query: self.q,
            tags: self
                .tags
                .map(|tags| {
                    tags.split(',')
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            date_range: self.range.unwrap_or_default(),
            sort_by: self.sort.unwrap_or_default(),
            sort_order: self.order.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_defaults() {
        let query = PageQuery::default();
        assert_eq!(query.page(), 1);
        assert_eq!(query.per_page(), DEFAULT_PER_PAGE);
    }

    #[test]
    fn test_search_query_into_options() {
        let query = SearchQuery {
            q: Some("tokio".into()),
            tags: Some("rust, async,,".into()),
            range: Some(DateRange::Month),
            sort: Some(SortBy::Comments),
            order: None,
        };
        assert!(!query.is_plain_text());

        let options = query.into_options();
        assert_eq!(options.query.as_deref(), Some("tokio"));
        assert_eq!(options.tags, vec!["rust", "async"]);
        assert_eq!(options.date_range, DateRange::Month);
        assert_eq!(options.sort_by, SortBy::Comments);
        assert_eq!(options.sort_order, SortOrder::Desc);
    }

    #[test]
    fn test_search_query_plain_text() {
        let query = SearchQuery {
            q: Some("tokio".into()),
            ..Default::default()
        };
        assert!(query.is_plain_text());
        assert!(!SearchQuery::default().is_plain_text());
    }

    #[test]
    fn test_validate_long_query() {
        let query = SearchQuery {
            q: Some("x".repeat(257)),
            ..Default::default()
        };
        assert!(query.validate().is_some());
        assert!(SearchQuery::default().validate().is_none());
    }
}
