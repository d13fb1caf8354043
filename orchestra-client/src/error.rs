//! Client error types.

use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Client Error
// ============================================================================

/// Error type for orchestrator client operations.
///
/// None of these are retried by the client; each surfaces immediately.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or HTTP-layer failure.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The orchestrator reported the request as failed.
    #[error("Request failed: {}", message.as_deref().unwrap_or("Unknown error"))]
    RequestFailed {
        /// Error message from the orchestrator, if it sent one.
        message: Option<String>,
    },

    /// The wait budget ran out while the request was still pending.
    #[error("Request timed out after {elapsed:?}")]
    Timeout {
        /// Time spent waiting.
        elapsed: Duration,
    },

    /// Invalid client configuration or options.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// Returns true for network/HTTP-layer failures.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    /// Returns true if the client gave up waiting.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Timeout { .. })
    }

    /// Returns true if the orchestrator reported a failure.
    pub fn is_request_failed(&self) -> bool {
        matches!(self, ClientError::RequestFailed { .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(TransportError::Request(err))
    }
}

// ============================================================================
// Transport Error
// ============================================================================

/// HTTP-layer error, not classified further by the client.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Request could not be sent or the response could not be read.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The orchestrator answered with a non-success status.
    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        /// Endpoint path that was called.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body text.
        body: String,
    },

    /// Response body was not the expected JSON.
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// Endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::Decode(err.to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_display() {
        let err = ClientError::RequestFailed {
            message: Some("rate limited".to_string()),
        };
        assert_eq!(err.to_string(), "Request failed: rate limited");

        let err = ClientError::RequestFailed { message: None };
        assert_eq!(err.to_string(), "Request failed: Unknown error");
    }

    #[test]
    fn test_status_error_display() {
        let err = ClientError::from(TransportError::Status {
            endpoint: "/status/abc".to_string(),
            status: 404,
            body: "not found".to_string(),
        });
        assert!(err.is_transport());
        assert_eq!(
            err.to_string(),
            "Transport error: /status/abc returned HTTP 404: not found"
        );
    }

    #[test]
    fn test_kind_predicates() {
        let timeout = ClientError::Timeout {
            elapsed: Duration::from_secs(120),
        };
        assert!(timeout.is_timeout());
        assert!(!timeout.is_transport());
        assert!(!timeout.is_request_failed());
    }
}
