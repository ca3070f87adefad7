//! Blog Module
//!
//! Posts sourced from GitHub issues, the queries run over them, and the
//! cached service that ties both to the time-boxed cache.

pub mod markdown;
pub mod post;
pub mod query;
pub mod service;
pub mod source;

pub use post::{BlogPost, Issue, PostAuthor};
pub use query::{AdvancedSearchOptions, DateRange, PostPage, SortBy, SortOrder, TagStat};
pub use service::{BlogService, PostTtls, MAX_PER_PAGE};
pub use source::{GithubIssues, InMemorySource, PostSource};
