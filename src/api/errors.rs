/// Errors from the API transport layer.
use serde_json::Value;
use thiserror::Error;

/// Raw failures raised by an API client, before classification.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// HTTP 429. The body usually carries a `detail` message.
    #[error("rate limited: {body}")]
    RateLimited {
        /// Parsed response body.
        body: Value,
    },

    /// Any other non-success status, with its parsed body.
    #[error("request failed with status {status}: {body}")]
    RequestFailed {
        /// HTTP status code.
        status: u16,
        /// Parsed response body.
        body: Value,
    },

    /// Connection, TLS, timeout or decoding failure.
    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
