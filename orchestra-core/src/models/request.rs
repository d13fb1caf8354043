//! Submission types.
//!
//! This module contains the types sent to `POST /chat`:
//! - [`ChatRequest`] - The request body
//! - [`Provider`] - Target provider (`auto` lets the orchestrator pick)
//! - [`Priority`] - Scheduling hint
//! - [`RequestHandle`] - Id handed back by the orchestrator

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ============================================================================
// Provider
// ============================================================================

/// Provider that should answer a prompt.
///
/// Serialized as a plain lowercase string. Names the client does not know
/// are kept verbatim in [`Provider::Custom`] so new orchestrator backends can
/// be targeted without a client release.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Provider {
    /// Let the orchestrator choose.
    #[default]
    Auto,
    /// OpenAI ChatGPT
    ChatGpt,
    /// Anthropic Claude
    Claude,
    /// Google Gemini
    Gemini,
    /// DeepSeek
    DeepSeek,
    /// Any other provider name understood by the orchestrator.
    Custom(String),
}

impl Provider {
    /// Returns the wire name for this provider.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Auto => "auto",
            Self::ChatGpt => "chatgpt",
            Self::Claude => "claude",
            Self::Gemini => "gemini",
            Self::DeepSeek => "deepseek",
            Self::Custom(name) => name,
        }
    }

    /// Returns the providers this client knows by name.
    pub fn known() -> [Provider; 5] {
        [
            Self::Auto,
            Self::ChatGpt,
            Self::Claude,
            Self::Gemini,
            Self::DeepSeek,
        ]
    }

    /// Returns true if the orchestrator is free to pick the provider.
    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl FromStr for Provider {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(CoreError::InvalidProvider(s.to_string()));
        }

        Ok(match name.as_str() {
            "auto" => Self::Auto,
            "chatgpt" => Self::ChatGpt,
            "claude" => Self::Claude,
            "gemini" => Self::Gemini,
            "deepseek" => Self::DeepSeek,
            _ => Self::Custom(name),
        })
    }
}

impl TryFrom<String> for Provider {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Provider> for String {
    fn from(provider: Provider) -> Self {
        match provider {
            Provider::Custom(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Priority
// ============================================================================

/// Scheduling priority hint for the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Jump ahead of normal traffic.
    High,
    /// Default priority.
    #[default]
    Normal,
    /// Background work.
    Low,
}

impl Priority {
    /// Returns the wire name for this priority.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Normal => "normal",
            Self::Low => "low",
        }
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "normal" => Ok(Self::Normal),
            "low" => Ok(Self::Low),
            _ => Err(CoreError::InvalidPriority(s.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Chat Request
// ============================================================================

/// Body of a `POST /chat` submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The prompt to send.
    pub prompt: String,
    /// Provider to route the prompt to.
    #[serde(default)]
    pub provider: Provider,
    /// Scheduling priority.
    #[serde(default)]
    pub priority: Priority,
}

impl ChatRequest {
    /// Creates a request with the default provider and priority.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            provider: Provider::default(),
            priority: Priority::default(),
        }
    }

    /// Sets the provider.
    #[must_use]
    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.provider = provider;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

// ============================================================================
// Request Handle
// ============================================================================

/// Opaque request id issued by the orchestrator on submission.
///
/// Deserializes from the `{"id": "..."}` submission response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestHandle {
    /// Server-assigned request id.
    pub id: String,
}

impl RequestHandle {
    /// Wraps a raw request id.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Returns the raw id.
    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for RequestHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl From<String> for RequestHandle {
    fn from(id: String) -> Self {
        Self { id }
    }
}

impl From<&str> for RequestHandle {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
