//! Error types for the ballchasing client.

use thiserror::Error;

/// Errors that can occur when talking to the ballchasing API.
#[derive(Error, Debug)]
pub enum BallchasingError {
    /// Base URL in the client configuration is unusable
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Endpoint path does not start with `/`
    #[error("Invalid endpoint {0:?}: must start with '/'")]
    InvalidEndpoint(String),

    /// Request URL could not be parsed
    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// HTTP client or request could not be built
    #[error("Failed to construct request: {0}")]
    RequestConstruction(#[source] reqwest::Error),

    /// Network exchange failed (DNS, connect, timeout, ...)
    #[error("HTTP request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Server answered with something other than 200 OK
    #[error("API returned status {status}")]
    UnexpectedStatus { status: u16 },

    /// Response body could not be read to the end
    #[error("Failed to read response body: {0}")]
    BodyRead(#[source] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl BallchasingError {
    /// True for every failure that happened before anything was sent.
    pub fn is_request_construction(&self) -> bool {
        matches!(
            self,
            Self::InvalidBaseUrl(_)
                | Self::InvalidEndpoint(_)
                | Self::InvalidUrl(_)
                | Self::RequestConstruction(_)
        )
    }

    /// HTTP status carried by an [`UnexpectedStatus`](Self::UnexpectedStatus) error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for ballchasing client operations.
pub type Result<T> = std::result::Result<T, BallchasingError>;
