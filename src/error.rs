//! Error types for the blog service
//!
//! Provides unified error handling using thiserror. The cache itself never
//! fails; every variant here comes from the issue tracker or from requests.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Blog Error Enum ==
/// Unified error type for the blog service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlogError {
    /// Requested post does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The issue tracker could not be reached or answered badly
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for BlogError {
    fn from(err: reqwest::Error) -> Self {
        BlogError::Upstream(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        let status = match &self {
            BlogError::NotFound(_) => StatusCode::NOT_FOUND,
            BlogError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            BlogError::Upstream(_) => StatusCode::BAD_GATEWAY,
            BlogError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the blog service.
pub type Result<T> = std::result::Result<T, BlogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (BlogError::NotFound("post 1".into()), StatusCode::NOT_FOUND),
            (BlogError::InvalidRequest("page".into()), StatusCode::BAD_REQUEST),
            (BlogError::Upstream("timeout".into()), StatusCode::BAD_GATEWAY),
            (BlogError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_display() {
        let err = BlogError::Upstream("GitHub returned 500".into());
        assert_eq!(err.to_string(), "Upstream error: GitHub returned 500");
    }
}
