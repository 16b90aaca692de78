//! Error types for the upstream data providers.

use thiserror::Error;

/// Errors that can occur while fetching or decoding upstream data. Any of
/// these aborts the refresh that raised it; the previous classroom set
/// stays in place.
#[derive(Debug, Error, Clone)]
pub enum UpstreamError {
    /// Network/HTTP request failed
    #[error("Network error: {message}")]
    Network { message: String },

    /// Server answered, but not with what we expected
    #[error("Unexpected response: {message}")]
    UnexpectedResponse { message: String },

    /// Payload did not decode into the expected shape
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Base URL is invalid or could not be joined
    #[error("URL error: {message}")]
    Url { message: String },
}

impl UpstreamError {
    /// Returns true if this error is potentially transient and retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            UpstreamError::Network { .. } | UpstreamError::UnexpectedResponse { .. }
        )
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        UpstreamError::Network {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for UpstreamError {
    fn from(err: url::ParseError) -> Self {
        UpstreamError::Url {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for UpstreamError {
    fn from(err: serde_json::Error) -> Self {
        UpstreamError::Parse {
            message: err.to_string(),
        }
    }
}
