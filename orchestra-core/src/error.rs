//! Core error types for Orchestra.

use thiserror::Error;

/// Core error type for model parsing.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Provider name could not be parsed.
    #[error("Invalid provider: {0:?}")]
    InvalidProvider(String),

    /// Priority name could not be parsed.
    #[error("Invalid priority: {0:?} (expected high, normal or low)")]
    InvalidPriority(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
