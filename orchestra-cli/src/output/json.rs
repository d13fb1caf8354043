//! JSON output formatting.

use anyhow::Result;
use orchestra_client::BatchOutcome;
use serde::Serialize;

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for one batch entry.
#[derive(Debug, Serialize)]
pub struct BatchItemOutput<'a> {
    pub prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
}

/// Error reported for a failed request without a message.
const UNKNOWN_ERROR: &str = "Unknown";

impl<'a> BatchItemOutput<'a> {
    /// Pairs a prompt with its response or error.
    pub fn new(prompt: &'a str, outcome: &'a BatchOutcome) -> Self {
        match outcome {
            BatchOutcome::Completed(text) => Self {
                prompt,
                response: Some(text.as_str()),
                error: None,
            },
            BatchOutcome::Failed(message) => Self {
                prompt,
                response: None,
                error: Some(message.as_deref().unwrap_or(UNKNOWN_ERROR)),
            },
        }
    }
}

// ============================================================================
// Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats batch results as an array of `{prompt, response | error}`.
    pub fn format_batch<S: AsRef<str>>(
        &self,
        prompts: &[S],
        outcomes: &[BatchOutcome],
    ) -> Result<String> {
        let items: Vec<BatchItemOutput<'_>> = prompts
            .iter()
            .zip(outcomes)
            .map(|(prompt, outcome)| BatchItemOutput::new(prompt.as_ref(), outcome))
            .collect();
        self.format(&items)
    }
}
