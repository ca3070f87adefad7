//! Post sources: the seam between the blog service and the issue tracker.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use tracing::{debug, error};

use crate::blog::post::{BlogPost, Issue};
use crate::config::GithubConfig;
use crate::error::{BlogError, Result};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Page size for the issue listing; the API caps it at 100
const PER_PAGE: &str = "100";

/// Anything that can list and fetch blog posts.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Returns every published post, newest first.
    async fn list_posts(&self) -> Result<Vec<BlogPost>>;

    /// Returns one post, or `None` if it does not exist or is not a post.
    async fn get_post(&self, number: u64) -> Result<Option<BlogPost>>;
}

// == GitHub Issues ==
/// Reads posts from the open issues of a GitHub repository.
pub struct GithubIssues {
    client: Client,
    config: GithubConfig,
}

impl GithubIssues {
    /// Creates a source with its own HTTP client.
    pub fn new(config: GithubConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| BlogError::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self::with_client(config, client))
    }

    /// Creates a source with a custom client.
    pub fn with_client(config: GithubConfig, client: Client) -> Self {
        Self { client, config }
    }

    fn issues_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/issues",
            self.config.api_url.trim_end_matches('/'),
            self.config.owner,
            self.config.repo
        )
    }

    fn issue_url(&self, number: u64) -> String {
        format!("{}/{}", self.issues_url(), number)
    }

    fn request(&self, url: &str) -> RequestBuilder {
        let request = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");

        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl PostSource for GithubIssues {
    async fn list_posts(&self) -> Result<Vec<BlogPost>> {
        let url = self.issues_url();
        debug!(url = %url, "Fetching issues");

        let response = self
            .request(&url)
            .query(&[
                ("state", "open"),
                ("sort", "created"),
                ("direction", "desc"),
                ("per_page", PER_PAGE),
            ])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                error!("Error fetching posts: {}", e);
                BlogError::Upstream(format!("Failed to fetch posts: {e}"))
            })?;

        let issues: Vec<Issue> = response.json().await?;
        Ok(issues.into_iter().filter_map(BlogPost::from_issue).collect())
    }

    async fn get_post(&self, number: u64) -> Result<Option<BlogPost>> {
        let url = self.issue_url(number);
        debug!(url = %url, "Fetching issue");

        let response = self.request(&url).send().await.map_err(|e| {
            error!("Error fetching post {}: {}", number, e);
            BlogError::Upstream(format!("Failed to fetch post {number}: {e}"))
        })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = response.error_for_status().map_err(|e| {
            error!("Error fetching post {}: {}", number, e);
            BlogError::Upstream(format!("Failed to fetch post {number}: {e}"))
        })?;

        let issue: Issue = response.json().await?;
        Ok(BlogPost::from_issue(issue))
    }
}

// == In-Memory Source ==
/// Serves a fixed list of posts without touching the network.
///
/// Counts upstream calls and can be switched into a failing mode, which
/// makes it the stand-in for GitHub in tests and offline runs.
#[derive(Debug, Default)]
pub struct InMemorySource {
    posts: Vec<BlogPost>,
    fetches: AtomicUsize,
    failing: AtomicBool,
}

impl InMemorySource {
    /// Creates a source over `posts`, kept in the given (listing) order.
    pub fn new(posts: Vec<BlogPost>) -> Self {
        Self {
            posts,
            ..Default::default()
        }
    }

    /// Number of `list_posts`/`get_post` calls served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Makes every following call fail with an upstream error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn begin_fetch(&self) -> Result<()> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(BlogError::Upstream("issue tracker unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PostSource for InMemorySource {
    async fn list_posts(&self) -> Result<Vec<BlogPost>> {
        self.begin_fetch()?;
        Ok(self.posts.clone())
    }

    async fn get_post(&self, number: u64) -> Result<Option<BlogPost>> {
        self.begin_fetch()?;
        Ok(self.posts.iter().find(|p| p.number == number).cloned())
    }
}
