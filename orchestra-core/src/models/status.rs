//! Request status types.
//!
//! This module contains the types returned by `GET /status/{id}`:
//! - [`RequestStatus`] - Snapshot of a submitted request
//! - [`RequestState`] - Lifecycle state
//! - [`ChatResponse`] - Fields extracted from a completed request

use serde::{Deserialize, Serialize};

// ============================================================================
// Request State
// ============================================================================

/// Lifecycle state of a submitted request.
///
/// Only [`RequestState::Completed`] and [`RequestState::Failed`] are terminal.
/// A request leaves the non-terminal states at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestState {
    /// Accepted, not yet picked up.
    Pending,
    /// Waiting in a provider queue.
    Queued,
    /// A provider is working on it.
    Processing,
    /// Finished with a response.
    Completed,
    /// Finished with an error.
    Failed,
    /// A state this client does not recognize. Treated as non-terminal.
    #[serde(other)]
    Unknown,
}

impl RequestState {
    /// Returns true once no further transitions can occur.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Returns the wire name for this state.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Queued => "queued",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for RequestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Request Status
// ============================================================================

/// Snapshot of a request as reported by the orchestrator.
///
/// Fetched fresh on each poll and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestStatus {
    /// Lifecycle state.
    pub status: RequestState,
    /// Response text, present once completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    /// Provider that actually handled the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_used: Option<String>,
    /// Tokens consumed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u64>,
    /// Provider latency in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    /// Error description, present once failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl RequestStatus {
    /// Creates a status with only the state set.
    pub fn new(status: RequestState) -> Self {
        Self {
            status,
            response: None,
            provider_used: None,
            tokens_used: None,
            latency_ms: None,
            error_message: None,
        }
    }

    /// Creates a completed status carrying `response`.
    pub fn completed(response: impl Into<String>) -> Self {
        Self {
            response: Some(response.into()),
            ..Self::new(RequestState::Completed)
        }
    }

    /// Creates a failed status carrying `message`.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error_message: Some(message.into()),
            ..Self::new(RequestState::Failed)
        }
    }

    /// Returns true if the request reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Extracts the response fields from a completed status.
    ///
    /// Returns `None` unless the state is [`RequestState::Completed`].
    pub fn to_response(&self) -> Option<ChatResponse> {
        if self.status != RequestState::Completed {
            return None;
        }

        Some(ChatResponse {
            text: self.response.clone().unwrap_or_default(),
            provider: self.provider_used.clone(),
            tokens: self.tokens_used,
            latency_ms: self.latency_ms,
        })
    }
}

// ============================================================================
// Chat Response
// ============================================================================

/// Result of a completed chat request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Response text (empty if the orchestrator omitted it).
    pub text: String,
    /// Provider that answered.
    pub provider: Option<String>,
    /// Tokens consumed.
    pub tokens: Option<u64>,
    /// Provider latency in milliseconds.
    pub latency_ms: Option<u64>,
}
