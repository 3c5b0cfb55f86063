//! Client-side error type.

use thiserror::Error;

/// Errors an API call can produce.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: connection refused, timeout, bad JSON, and so on.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error status and an `{"error": ...}` body.
    #[error("server returned {status}: {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },
}

impl ClientError {
    /// True when the server rejected the request (as opposed to the request
    /// never completing).
    pub fn is_api_error(&self) -> bool {
        matches!(self, ClientError::Api { .. })
    }

    /// The server's own error message, when there is one.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => Some(message),
            ClientError::Http(_) => None,
        }
    }
}
