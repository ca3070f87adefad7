//! Blog post model and the GitHub issue payload it is built from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::blog::markdown::{estimate_reading_time, extract_excerpt, generate_slug};

// == Blog Post ==
/// A published post: one open issue of the blog repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub html_url: String,
    pub comments: u64,
    pub user: PostAuthor,
    /// Plain-text summary of the body
    pub excerpt: String,
    /// Estimated reading time in minutes
    pub reading_time: u32,
    pub slug: String,
}

/// Author shown next to a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostAuthor {
    pub login: String,
    pub avatar_url: String,
}

impl BlogPost {
    /// Builds a post from an issue, deriving excerpt, reading time and slug.
    ///
    /// Returns `None` for pull requests, which share the issues endpoint.
    pub fn from_issue(issue: Issue) -> Option<Self> {
        if issue.pull_request.is_some() {
            return None;
        }

        let body = issue.body.unwrap_or_default();
        let user = issue
            .user
            .map(|u| PostAuthor {
                login: u.login,
                avatar_url: u.avatar_url,
            })
            .unwrap_or_default();

        Some(Self {
            excerpt: extract_excerpt(&body, 200),
            reading_time: estimate_reading_time(&body),
            slug: generate_slug(&issue.title),
            id: issue.id,
            number: issue.number,
            labels: issue.labels.into_iter().map(IssueLabel::into_name).collect(),
            title: issue.title,
            body,
            created_at: issue.created_at,
            updated_at: issue.updated_at,
            html_url: issue.html_url,
            comments: issue.comments,
            user,
        })
    }

    /// True if the post carries `tag` exactly.
    pub fn has_label(&self, tag: &str) -> bool {
        self.labels.iter().any(|label| label == tag)
    }
}

// == Issue Payload ==
/// Subset of the GitHub issue object the blog needs.
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub id: u64,
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub labels: Vec<IssueLabel>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub html_url: String,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub user: Option<IssueUser>,
    /// Present only when the issue is a pull request
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

/// Labels arrive either as bare names or as label objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IssueLabel {
    Name(String),
    Detailed {
        #[serde(default)]
        name: Option<String>,
    },
}

impl IssueLabel {
    fn into_name(self) -> String {
        match self {
            IssueLabel::Name(name) => name,
            IssueLabel::Detailed { name } => name.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueUser {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn issue_json() -> serde_json::Value {
        json!({
            "id": 101,
            "number": 7,
            "title": "Hello World!",
            "body": "# Intro\n\nSome **bold** words.",
            "labels": [{"name": "rust"}, "notes", {"name": null}],
            "created_at": "2024-03-01T10:00:00Z",
            "updated_at": "2024-03-02T10:00:00Z",
            "html_url": "https://github.com/o/r/issues/7",
            "comments": 3,
            "user": {"login": "author", "avatar_url": "https://avatars/a.png"}
        })
    }

    #[test]
    fn test_from_issue_maps_fields() {
        let issue: Issue = serde_json::from_value(issue_json()).unwrap();
        let post = BlogPost::from_issue(issue).unwrap();

        assert_eq!(post.number, 7);
        assert_eq!(post.labels, vec!["rust", "notes", ""]);
        assert_eq!(post.user.login, "author");
        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.excerpt, "Intro Some bold words.");
        assert_eq!(post.reading_time, 1);
        assert!(post.has_label("rust"));
        assert!(!post.has_label("Rust"));
    }

    #[test]
    fn test_from_issue_skips_pull_requests() {
        let mut value = issue_json();
        value["pull_request"] = json!({"url": "https://api.github.com/pulls/7"});
        let issue: Issue = serde_json::from_value(value).unwrap();

        assert!(BlogPost::from_issue(issue).is_none());
    }

    #[test]
    fn test_from_issue_missing_body_and_user() {
        let mut value = issue_json();
        value["body"] = serde_json::Value::Null;
        value.as_object_mut().unwrap().remove("user");
        let issue: Issue = serde_json::from_value(value).unwrap();
        let post = BlogPost::from_issue(issue).unwrap();

        assert_eq!(post.body, "");
        assert_eq!(post.excerpt, "");
        assert_eq!(post.user, PostAuthor::default());
    }
}
