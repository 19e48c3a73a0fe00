//! Main ballchasing API client.

use crate::error::{BallchasingError, Result};
use crate::groups::GroupsClient;
use crate::replays::ReplaysClient;
use crate::types::{ClientConfig, QueryParams};
use bytes::Bytes;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use std::fmt;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Client for the ballchasing.com API.
///
/// Holds a shared HTTP connection pool and a read-only configuration, so a
/// single instance can be cloned or shared freely between tasks.
///
/// # Example
///
/// ```ignore
/// use ballchasing_client::{BallchasingClient, ClientConfig};
///
/// let client = BallchasingClient::new(ClientConfig::new(api_key))?;
///
/// let replays = client.replays().list_replays_by_playlist("ranked-duels", 5).await?;
/// for replay in &replays.list {
///     println!("{} ({}s)", replay.title, replay.duration);
/// }
/// ```
#[derive(Clone)]
pub struct BallchasingClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for BallchasingClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BallchasingClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl BallchasingClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(BallchasingError::InvalidBaseUrl(
                "URL cannot be empty".into(),
            ));
        }

        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(BallchasingError::InvalidBaseUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("ballchasing-client/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(BallchasingError::RequestConstruction)?;

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key,
        })
    }

    /// Get the normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check if requests carry an API key.
    pub fn is_authenticated(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Replay listing and detail operations.
    pub fn replays(&self) -> ReplaysClient<'_> {
        ReplaysClient::new(self)
    }

    /// Replay group operations.
    pub fn groups(&self) -> GroupsClient<'_> {
        GroupsClient::new(self)
    }

    /// Issue an authenticated GET and return the raw body of a 200 response.
    ///
    /// `endpoint` is appended to the base URL and must start with `/`.
    /// Parameters, if any, are URL-encoded into the query string.
    pub async fn request(&self, endpoint: &str, query: Option<&QueryParams>) -> Result<Bytes> {
        let url = self.build_url(endpoint, query)?;
        debug!(url = %url, "Requesting");

        let mut builder = self.http.get(url);
        if !self.api_key.is_empty() {
            builder = builder.header(AUTHORIZATION, self.api_key.as_str());
        }
        let request = builder
            .build()
            .map_err(BallchasingError::RequestConstruction)?;

        let response = self
            .http
            .execute(request)
            .await
            .map_err(BallchasingError::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(BallchasingError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(BallchasingError::BodyRead)?;
        debug!(bytes = body.len(), "Received response");

        Ok(body)
    }

    pub(crate) fn build_url(&self, endpoint: &str, query: Option<&QueryParams>) -> Result<Url> {
        if !endpoint.starts_with('/') {
            return Err(BallchasingError::InvalidEndpoint(endpoint.to_string()));
        }

        let mut url = Url::parse(&format!("{}{}", self.base_url, endpoint))?;
        if let Some(params) = query.filter(|p| !p.is_empty()) {
            url.query_pairs_mut().extend_pairs(params.iter());
        }

        Ok(url)
    }
}
