//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::{DEFAULT_SWEEP_INTERVAL_MS, DEFAULT_TTL_MS};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Default TTL in seconds for cache writes without an explicit TTL
    pub default_ttl: u64,
    /// Background sweep interval in seconds
    pub sweep_interval: u64,
    /// TTL in seconds for post listings, tag lists and tag lookups
    pub posts_ttl: u64,
    /// TTL in seconds for single post lookups
    pub post_ttl: u64,
    /// GitHub connection settings
    pub github: GithubConfig,
}

/// Where posts are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubConfig {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Optional token, raises the API rate limit
    pub token: Option<String>,
    /// Base URL of the REST API
    pub api_url: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DEFAULT_TTL_SECS` - Default cache TTL in seconds (default: 300)
    /// - `SWEEP_INTERVAL_SECS` - Sweep frequency in seconds (default: 600)
    /// - `POSTS_TTL_SECS` - TTL for listings and tags (default: 600)
    /// - `POST_TTL_SECS` - TTL for single posts (default: 900)
    /// - `GITHUB_OWNER` / `GITHUB_REPO` - Source repository
    /// - `GITHUB_TOKEN` - Optional API token
    /// - `GITHUB_API_URL` - API base URL (default: https://api.github.com)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            default_ttl: env_or("DEFAULT_TTL_SECS", defaults.default_ttl),
            sweep_interval: env_or("SWEEP_INTERVAL_SECS", defaults.sweep_interval),
            posts_ttl: env_or("POSTS_TTL_SECS", defaults.posts_ttl),
            post_ttl: env_or("POST_TTL_SECS", defaults.post_ttl),
            github: GithubConfig {
                owner: env_or("GITHUB_OWNER", defaults.github.owner),
                repo: env_or("GITHUB_REPO", defaults.github.repo),
                token: env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()),
                api_url: env_or("GITHUB_API_URL", defaults.github.api_url),
            },
        }
    }

    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval)
    }

    pub fn posts_ttl(&self) -> Duration {
        Duration::from_secs(self.posts_ttl)
    }

    pub fn post_ttl(&self) -> Duration {
        Duration::from_secs(self.post_ttl)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            default_ttl: DEFAULT_TTL_MS / 1000,
            sweep_interval: DEFAULT_SWEEP_INTERVAL_MS / 1000,
            posts_ttl: 600,
            post_ttl: 900,
            github: GithubConfig::default(),
        }
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            owner: "hepingfly".to_string(),
            repo: "hepingfly.github.io".to_string(),
            token: None,
            api_url: "https://api.github.com".to_string(),
        }
    }
}

/// Reads and parses an environment variable, falling back on absence or
/// parse failure.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
