//! API client for the launch listing REST API.
//!
//! `ApiClient` wraps a pooled `reqwest::Client` and implements
//! `LaunchSource`, the one remote capability the orchestrator needs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Url};
use tracing::debug;

use crate::models::{Dataset, LaunchResponse};

use super::ApiError;

/// HTTP request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Remote source of launch listings.
#[async_trait]
pub trait LaunchSource: Send + Sync {
    /// Fetch the next `count` upcoming launches.
    async fn fetch_top(&self, count: usize) -> Result<Dataset, ApiError>;
}

/// API client for the launch listing service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new API client rooted at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Self::with_client(client, base_url)
    }

    /// Create an API client on an existing `reqwest::Client`, sharing its
    /// connection pool and settings.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, ApiError> {
        // Url::join drops the last path segment unless the base ends in '/'
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", path, e)))
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }
}

#[async_trait]
impl LaunchSource for ApiClient {
    async fn fetch_top(&self, count: usize) -> Result<Dataset, ApiError> {
        let url = self.endpoint(&format!("launch/next/{}", count))?;
        debug!(%url, "Fetching upcoming launches");

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let response = Self::check_response(response).await?;

        let text = response.text().await?;
        let parsed: LaunchResponse = serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse launch list: {}", e)))?;

        debug!(count = parsed.launches.len(), "Launch list received");
        Ok(parsed.launches)
    }
}
