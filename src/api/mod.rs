mod cache;
mod error;

pub use cache::CachePolicy;
pub use error::{error_detail, BlogNotFound, FetchError, LoginError};

use crate::models::{Blog, BlogQuery, Credentials, PaginatedResponse, TokenResponse};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::CACHE_CONTROL;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Typed wrapper around the blog REST API. One attempt per call; no retries
/// and no client-side timeout.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid API base URL '{}'", base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("API base URL '{}' cannot carry a path", base_url);
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("blog-frontend/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // new() rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn blogs_url(&self, query: &BlogQuery) -> Url {
        let mut url = self.endpoint(&["api", "blogs"]);
        let pairs = query.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())));
        }
        url
    }

    pub fn blog_url(&self, id: &str) -> Url {
        self.endpoint(&["api", "blogs", id])
    }

    pub fn login_url(&self) -> Url {
        self.endpoint(&["api", "auth", "login"])
    }

    pub async fn fetch_blogs(
        &self,
        query: &BlogQuery,
    ) -> Result<PaginatedResponse<Blog>, FetchError> {
        let url = self.blogs_url(query);
        tracing::debug!(%url, "GET blog list");

        let response = self
            .http
            .get(url)
            .header(CACHE_CONTROL, CachePolicy::BLOG_LIST.request_header())
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Blog list request failed: {}", e);
                FetchError::Request(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Blog list returned {}", status);
            return Err(FetchError::Status(status));
        }

        response.json().await.map_err(|e| {
            tracing::warn!("Blog list body could not be decoded: {}", e);
            FetchError::Request(e)
        })
    }

    pub async fn fetch_blog_by_id(&self, id: &str) -> Result<Blog, BlogNotFound> {
        let url = self.blog_url(id);
        tracing::debug!(%url, "GET blog");

        let not_found = |status, source| BlogNotFound {
            id: id.to_string(),
            status,
            source,
        };

        let response = self
            .http
            .get(url)
            .header(CACHE_CONTROL, CachePolicy::BLOG_DETAIL.request_header())
            .send()
            .await
            .map_err(|e| not_found(None, Some(e)))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Blog '{}' returned {}", id, status);
            return Err(not_found(Some(status), None));
        }

        response
            .json()
            .await
            .map_err(|e| not_found(Some(status), Some(e)))
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, LoginError> {
        let url = self.login_url();
        tracing::debug!(%url, username, "POST login");

        let response = self
            .http
            .post(url)
            .json(&Credentials { username, password })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .as_ref()
                .and_then(error_detail);
            tracing::info!("Login for '{}' rejected with {}", username, status);
            return Err(LoginError::Rejected { status, detail });
        }

        Ok(response.json().await?)
    }
}

/// The login capability the form depends on.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, LoginError>;
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, LoginError> {
        ApiClient::login(self, username, password).await
    }
}
