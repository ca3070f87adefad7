//! Pure post queries: search, filtering, sorting and listing views.
//!
//! Everything here works on an already-fetched slice of posts, so the
//! service can run it over the cached listing.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::blog::post::BlogPost;

// == Search Options ==
/// Filters and ordering for an advanced search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AdvancedSearchOptions {
    /// Case-insensitive text matched against title, body and labels
    #[serde(default)]
    pub query: Option<String>,
    /// Keep posts carrying at least one of these labels
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub date_range: DateRange,
    #[serde(default)]
    pub sort_by: SortBy,
    #[serde(default)]
    pub sort_order: SortOrder,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    #[default]
    All,
    Week,
    Month,
    Year,
}

impl DateRange {
    /// Oldest creation time still inside the range, or `None` for `All`.
    pub fn cutoff(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            DateRange::All => None,
            DateRange::Week => Some(now - Duration::days(7)),
            DateRange::Month => now.checked_sub_months(Months::new(1)),
            DateRange::Year => now.checked_sub_months(Months::new(12)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Date,
    Title,
    Comments,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Number of posts carrying a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagStat {
    pub name: String,
    pub count: usize,
}

/// One page of posts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostPage {
    pub posts: Vec<BlogPost>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

// == Queries ==
/// True if `query` occurs in the title, body or any label, ignoring case.
pub fn matches_query(post: &BlogPost, query: &str) -> bool {
    let needle = query.to_lowercase();
    post.title.to_lowercase().contains(&needle)
        || post.body.to_lowercase().contains(&needle)
        || post
            .labels
            .iter()
            .any(|label| label.to_lowercase().contains(&needle))
}

/// Posts matching `query`, in listing order.
pub fn search(posts: &[BlogPost], query: &str) -> Vec<BlogPost> {
    posts
        .iter()
        .filter(|post| matches_query(post, query))
        .cloned()
        .collect()
}

/// Applies every filter in `options`, then sorts.
///
/// Sorting is stable, so posts that compare equal keep their listing order.
pub fn advanced_search(
    posts: &[BlogPost],
    options: &AdvancedSearchOptions,
    now: DateTime<Utc>,
) -> Vec<BlogPost> {
    let query = options.query.as_deref().filter(|q| !q.is_empty());
    let cutoff = options.date_range.cutoff(now);

    let mut found: Vec<BlogPost> = posts
        .iter()
        .filter(|post| query.map_or(true, |q| matches_query(post, q)))
        .filter(|post| options.tags.is_empty() || options.tags.iter().any(|t| post.has_label(t)))
        .filter(|post| cutoff.map_or(true, |c| post.created_at >= c))
        .cloned()
        .collect();

    found.sort_by(|a, b| {
        let ordering = compare(a, b, options.sort_by);
        match options.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    found
}

fn compare(a: &BlogPost, b: &BlogPost, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::Date => a.created_at.cmp(&b.created_at),
        SortBy::Title => a
            .title
            .to_lowercase()
            .cmp(&b.title.to_lowercase())
            .then_with(|| a.title.cmp(&b.title)),
        SortBy::Comments => a.comments.cmp(&b.comments),
    }
}

/// Slices out a 1-based page. A `page` of zero is read as the first page.
pub fn paginate(posts: &[BlogPost], page: usize, per_page: usize) -> PostPage {
    let total = posts.len();
    let start = page.saturating_sub(1).saturating_mul(per_page);
    let end = start.saturating_add(per_page);

    PostPage {
        posts: posts
            .iter()
            .skip(start)
            .take(per_page)
            .cloned()
            .collect(),
        total,
        page,
        per_page,
        has_next: end < total,
        has_prev: page > 1,
    }
}

/// Other posts ranked by how many labels they share with `current`.
pub fn related(posts: &[BlogPost], current: &BlogPost, limit: usize) -> Vec<BlogPost> {
    let mut scored: Vec<(usize, &BlogPost)> = posts
        .iter()
        .filter(|post| post.id != current.id)
        .map(|post| {
            let shared = post
                .labels
                .iter()
                .filter(|label| current.labels.contains(*label))
                .count();
            (shared, post)
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, post)| post.clone())
        .collect()
}

/// The first `limit` posts of the listing.
pub fn latest(posts: &[BlogPost], limit: usize) -> Vec<BlogPost> {
    posts.iter().take(limit).cloned().collect()
}

/// The `limit` most commented posts.
pub fn popular(posts: &[BlogPost], limit: usize) -> Vec<BlogPost> {
    let mut sorted = posts.to_vec();
    sorted.sort_by(|a, b| b.comments.cmp(&a.comments));
    sorted.truncate(limit);
    sorted
}

/// Sorted, de-duplicated, non-empty labels across all posts.
pub fn all_tags(posts: &[BlogPost]) -> Vec<String> {
    posts
        .iter()
        .flat_map(|post| post.labels.iter())
        .filter(|label| !label.is_empty())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Posts carrying `tag`.
pub fn with_tag(posts: &[BlogPost], tag: &str) -> Vec<BlogPost> {
    posts.iter().filter(|post| post.has_label(tag)).cloned().collect()
}

/// Label usage counts, most used first; ties keep first-seen order.
pub fn tag_stats(posts: &[BlogPost]) -> Vec<TagStat> {
    let mut stats: Vec<TagStat> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for label in posts.iter().flat_map(|post| post.labels.iter()) {
        if label.is_empty() {
            continue;
        }
        match index.get(label.as_str()) {
            Some(&i) => stats[i].count += 1,
            None => {
                index.insert(label.as_str(), stats.len());
                stats.push(TagStat {
                    name: label.clone(),
                    count: 1,
                });
            }
        }
    }

    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blog::post::PostAuthor;
    use chrono::TimeZone;

    fn post(id: u64, title: &str, labels: &[&str], comments: u64, day: u32) -> BlogPost {
        let created = Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap();
        BlogPost {
            id,
            number: id,
            title: title.to_string(),
            body: format!("Body of {title}"),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            created_at: created,
            updated_at: created,
            html_url: format!("https://github.com/o/r/issues/{id}"),
            comments,
            user: PostAuthor::default(),
            excerpt: String::new(),
            reading_time: 1,
            slug: String::new(),
        }
    }

    fn sample() -> Vec<BlogPost> {
        // Listing order is newest first
        vec![
            post(4, "Tokio internals", &["rust", "async"], 2, 20),
            post(3, "baking bread", &["life"], 9, 15),
            post(2, "Async Rust", &["rust", "async", ""], 5, 10),
            post(1, "Hello", &["life", "rust"], 0, 1),
        ]
    }

    fn ids(posts: &[BlogPost]) -> Vec<u64> {
        posts.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let posts = sample();
        assert_eq!(ids(&search(&posts, "ASYNC")), vec![4, 2]);
        assert_eq!(ids(&search(&posts, "body of hello")), vec![1]);
        assert!(search(&posts, "missing").is_empty());
    }

    #[test]
    fn test_advanced_search_defaults_to_date_desc() {
        let posts = sample();
        let now = Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap();

        let found = advanced_search(&posts, &AdvancedSearchOptions::default(), now);
        assert_eq!(ids(&found), vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_advanced_search_filters_and_sorts() {
        let posts = sample();
        let now = Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap();
        let options = AdvancedSearchOptions {
            tags: vec!["life".into(), "async".into()],
            sort_by: SortBy::Comments,
            sort_order: SortOrder::Asc,
            ..Default::default()
        };

        assert_eq!(ids(&advanced_search(&posts, &options, now)), vec![1, 4, 2, 3]);
    }

    #[test]
    fn test_advanced_search_title_sort_ignores_case() {
        let posts = sample();
        let now = Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap();
        let options = AdvancedSearchOptions {
            sort_by: SortBy::Title,
            sort_order: SortOrder::Asc,
            ..Default::default()
        };

        assert_eq!(ids(&advanced_search(&posts, &options, now)), vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_advanced_search_date_range() {
        let posts = sample();
        let now = Utc.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap();
        let options = AdvancedSearchOptions {
            query: Some("".into()),
            date_range: DateRange::Week,
            ..Default::default()
        };

        assert_eq!(ids(&advanced_search(&posts, &options, now)), vec![4, 3]);
    }

    #[test]
    fn test_date_range_cutoffs() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap();

        assert_eq!(DateRange::All.cutoff(now), None);
        assert_eq!(
            DateRange::Month.cutoff(now),
            Some(Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap())
        );
        assert_eq!(
            DateRange::Year.cutoff(now),
            Some(Utc.with_ymd_and_hms(2023, 3, 31, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_paginate() {
        let posts = sample();

        let first = paginate(&posts, 1, 3);
        assert_eq!(ids(&first.posts), vec![4, 3, 2]);
        assert_eq!(first.total, 4);
        assert!(first.has_next);
        assert!(!first.has_prev);

        let second = paginate(&posts, 2, 3);
        assert_eq!(ids(&second.posts), vec![1]);
        assert!(!second.has_next);
        assert!(second.has_prev);

        let beyond = paginate(&posts, 5, 3);
        assert!(beyond.posts.is_empty());
    }

    #[test]
    fn test_paginate_page_zero_reads_first_page() {
        let posts = sample();

        let page = paginate(&posts, 0, 3);
        assert_eq!(ids(&page.posts), vec![4, 3, 2]);
        assert!(!page.has_prev);
    }

    #[test]
    fn test_related_ranks_by_shared_labels() {
        let posts = sample();
        let current = posts[2].clone(); // "Async Rust": rust, async

        assert_eq!(ids(&related(&posts, &current, 3)), vec![4, 1, 3]);
        assert_eq!(ids(&related(&posts, &current, 1)), vec![4]);
    }

    #[test]
    fn test_latest_and_popular() {
        let posts = sample();

        assert_eq!(ids(&latest(&posts, 2)), vec![4, 3]);
        assert_eq!(ids(&popular(&posts, 2)), vec![3, 2]);
        assert_eq!(popular(&posts, 10).len(), 4);
    }

    #[test]
    fn test_tags() {
        let posts = sample();

        assert_eq!(all_tags(&posts), vec!["async", "life", "rust"]);
        assert_eq!(ids(&with_tag(&posts, "life")), vec![3, 1]);
        assert_eq!(
            tag_stats(&posts),
            vec![
                TagStat { name: "rust".into(), count: 3 },
                TagStat { name: "async".into(), count: 2 },
                TagStat { name: "life".into(), count: 2 },
            ]
        );
    }
}
