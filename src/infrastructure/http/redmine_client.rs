//! HTTP client for attachment detail pages.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};
use url::Url;

use crate::domain::entities::AttachmentId;
use crate::domain::errors::ResolveError;
use crate::domain::ports::AttachmentSourcePort;

const USER_AGENT: &str = concat!("redmine-glightbox/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fetches pages from a Redmine site.
pub struct RedmineClient {
    client: Client,
    base_url: Url,
}

impl RedmineClient {
    /// Creates client for the site at `base_url`.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(base_url: Url) -> Result<Self, reqwest::Error> {
        Self::with_options(base_url, USER_AGENT, DEFAULT_TIMEOUT_SECS)
    }

    /// Creates client with a custom user agent and timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_options(
        base_url: Url,
        user_agent: &str,
        timeout_secs: u64,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Site root all relative paths resolve against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches the HTML of any page of the site.
    ///
    /// # Errors
    /// Returns the HTTP status on non-success responses, or the transport error.
    pub async fn fetch_page(&self, url: &Url) -> Result<String, PageFetchError> {
        debug!(url = %url, "Fetching page");

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Failed to reach Redmine");
            PageFetchError::Transport(describe(&e))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PageFetchError::Status(status));
        }

        response
            .text()
            .await
            .map_err(|e| PageFetchError::Transport(format!("failed to read body: {e}")))
    }

    fn detail_url(&self, id: AttachmentId) -> Result<Url, ResolveError> {
        self.base_url
            .join(id.detail_path().trim_start_matches('/'))
            .map_err(|e| ResolveError::network(id, format!("invalid attachment URL: {e}")))
    }
}

/// Failure fetching a page.
#[derive(Debug, thiserror::Error)]
pub enum PageFetchError {
    /// Non-success HTTP status.
    #[error("HTTP {0}")]
    Status(StatusCode),
    /// Connection, timeout or body error.
    #[error("{0}")]
    Transport(String),
}

fn describe(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "request timed out".to_string()
    } else if e.is_connect() {
        "failed to connect".to_string()
    } else {
        e.to_string()
    }
}

#[async_trait]
impl AttachmentSourcePort for RedmineClient {
    async fn fetch_detail_page(&self, id: AttachmentId) -> Result<String, ResolveError> {
        let url = self.detail_url(id)?;

        self.fetch_page(&url).await.map_err(|e| match e {
            PageFetchError::Status(status) => ResolveError::Status {
                id,
                status: status.as_u16(),
            },
            PageFetchError::Transport(message) => ResolveError::network(id, message),
        })
    }
}
