//! HTTP client for the WordPress REST API

use thiserror::Error;

use super::post::RemotePost;
use crate::helpers::url::encode_query;

/// Errors raised while fetching posts
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status}")]
    Status { status: reqwest::StatusCode },

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client for a single WordPress site's `wp-json/wp/v2` endpoint
#[derive(Debug, Clone)]
pub struct WpClient {
    http: reqwest::Client,
    base_url: String,
}

impl WpClient {
    /// Create a client for the given API base URL
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("pressroom/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The configured API base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Posts matching a slug
    ///
    /// WordPress treats `slug` as a filter, so the response is a list;
    /// an unknown slug yields an empty one rather than an error status.
    pub async fn posts_by_slug(&self, slug: &str) -> Result<Vec<RemotePost>, FetchError> {
        let url = self.posts_url(&format!("slug={}", encode_query(slug)));
        self.fetch(&url).await
    }

    /// The most recent posts, newest first
    pub async fn recent_posts(&self, count: usize) -> Result<Vec<RemotePost>, FetchError> {
        let url = self.posts_url(&format!("per_page={}", count));
        self.fetch(&url).await
    }

    async fn fetch(&self, url: &str) -> Result<Vec<RemotePost>, FetchError> {
        tracing::debug!("GET {}", url);
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status });
        }

        let body = response.text().await?;
        let posts = serde_json::from_str(&body)?;
        Ok(posts)
    }

    fn posts_url(&self, query: &str) -> String {
        format!("{}/posts?{}", self.base_url, query)
    }
}
