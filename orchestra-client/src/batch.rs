//! Batch submission with paced admission.
//!
//! Prompts are submitted in admission groups of `max_concurrent`, with a
//! fixed pause between groups. This limits the submission rate only; it
//! does not cap how many requests are in flight on the server. Once every
//! prompt is submitted, handles are polled one after another, in input
//! order, until each reaches a terminal state.

use std::time::Duration;

use futures::future::try_join_all;
use orchestra_core::{Priority, Provider, RequestHandle, RequestState};
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use crate::api::OrchestratorApi;
use crate::client::OrchestratorClient;
use crate::error::ClientError;

/// Prefix of the entry recorded for a failed request.
pub const BATCH_ERROR_PREFIX: &str = "ERROR: ";

/// Default size of an admission group.
pub const DEFAULT_MAX_CONCURRENT: usize = 10;

/// Message used when a failed request carries no error message.
const UNKNOWN_ERROR: &str = "Unknown";

// ============================================================================
// Batch Options
// ============================================================================

/// Options for [`OrchestratorClient::batch`].
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Provider for every prompt.
    pub provider: Provider,
    /// Priority for every prompt.
    pub priority: Priority,
    /// Submissions per admission group. Must be at least 1.
    pub max_concurrent: usize,
    /// Pause between admission groups.
    pub pacing_delay: Duration,
    /// Delay between status polls while collecting.
    pub poll_interval: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            priority: Priority::default(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            pacing_delay: Duration::from_secs(1),
            poll_interval: Duration::from_secs(1),
        }
    }
}

impl BatchOptions {
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

    /// Sets the admission group size.
    #[must_use]
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent;
        self
    }
}

/// Formats the in-band entry for a failed request.
fn error_entry(message: Option<&str>) -> String {
    format!("{BATCH_ERROR_PREFIX}{}", message.unwrap_or(UNKNOWN_ERROR))
}

// ============================================================================
// Batch Outcome
// ============================================================================

/// Terminal result of one batch prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Completed with this response text.
    Completed(String),
    /// Failed, with the orchestrator's error message if it sent one.
    Failed(Option<String>),
}

impl BatchOutcome {
    /// Returns true for a failed request.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns the flat entry: the response text, or `"ERROR: <message>"`.
    pub fn into_entry(self) -> String {
        match self {
            Self::Completed(text) => text,
            Self::Failed(message) => error_entry(message.as_deref()),
        }
    }
}

// ============================================================================
// Batch Runner
// ============================================================================

impl<A: OrchestratorApi> OrchestratorClient<A> {
    /// Runs a batch of prompts and returns one entry per prompt, in input
    /// order.
    ///
    /// A completed request yields its response text. A failed request
    /// yields `"ERROR: <message>"` instead of aborting the batch.
    ///
    /// # Errors
    ///
    /// - `ClientError::InvalidConfig` if `max_concurrent` is 0
    /// - `ClientError::Transport` if any submission or poll fails
    pub async fn batch<S: AsRef<str> + Sync>(
        &self,
        prompts: &[S],
        options: &BatchOptions,
    ) -> Result<Vec<String>, ClientError> {
        let outcomes = self.batch_outcomes(prompts, options).await?;
        Ok(outcomes.into_iter().map(BatchOutcome::into_entry).collect())
    }

    /// Runs a batch like [`OrchestratorClient::batch`] but keeps completed
    /// and failed requests apart, in input order.
    ///
    /// # Errors
    ///
    /// Same as [`OrchestratorClient::batch`].
    #[instrument(skip(self, prompts, options), fields(count = prompts.len(), max_concurrent = options.max_concurrent))]
    pub async fn batch_outcomes<S: AsRef<str> + Sync>(
        &self,
        prompts: &[S],
        options: &BatchOptions,
    ) -> Result<Vec<BatchOutcome>, ClientError> {
        if options.max_concurrent == 0 {
            return Err(ClientError::InvalidConfig(
                "max_concurrent must be at least 1".to_string(),
            ));
        }

        let handles = self.submit_paced(prompts, options).await?;
        info!(submitted = handles.len(), "Batch submitted, collecting results");

        let mut results = Vec::with_capacity(handles.len());
        for handle in &handles {
            results.push(self.collect(handle, options.poll_interval).await?);
        }

        Ok(results)
    }

    /// Submits prompts group by group, pausing between groups.
    async fn submit_paced<S: AsRef<str> + Sync>(
        &self,
        prompts: &[S],
        options: &BatchOptions,
    ) -> Result<Vec<RequestHandle>, ClientError> {
        let mut handles = Vec::with_capacity(prompts.len());

        for (group, chunk) in prompts.chunks(options.max_concurrent).enumerate() {
            if group > 0 {
                debug!(group, delay = ?options.pacing_delay, "Pausing between admission groups");
                sleep(options.pacing_delay).await;
            }

            let submissions = chunk.iter().map(|prompt| {
                self.submit(prompt.as_ref(), options.provider.clone(), options.priority)
            });
            handles.extend(try_join_all(submissions).await?);
        }

        Ok(handles)
    }

    /// Polls one handle until it is terminal.
    async fn collect(
        &self,
        handle: &RequestHandle,
        poll_interval: Duration,
    ) -> Result<BatchOutcome, ClientError> {
        loop {
            let status = self.poll(handle).await?;

            if let Some(response) = status.to_response() {
                return Ok(BatchOutcome::Completed(response.text));
            }

            if status.status == RequestState::Failed {
                warn!(id = %handle, error = ?status.error_message, "Batch request failed");
                return Ok(BatchOutcome::Failed(status.error_message));
            }

            sleep(poll_interval).await;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
