//! High-level orchestrator client.
//!
//! [`OrchestratorClient`] turns intents (chat, quota check, batch) into the
//! three-endpoint protocol and enforces the client-side wait budget the
//! server does not. Batch mode lives in [`crate::batch`].

use std::time::Duration;

use orchestra_core::{
    ChatRequest, ChatResponse, Priority, Provider, QuotaReport, RequestHandle, RequestState,
    RequestStatus,
};
use tokio::time::{sleep, Instant};
use tracing::{debug, info, instrument, warn};

use crate::api::OrchestratorApi;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::HttpApi;

/// Default wait budget for [`OrchestratorClient::await_completion`].
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(120);

/// Default delay between status polls, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Default delay between status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(DEFAULT_POLL_INTERVAL_MS);

// ============================================================================
// Chat Options
// ============================================================================

/// Per-call options for [`OrchestratorClient::await_completion`].
#[derive(Debug, Clone)]
pub struct ChatOptions {
    /// Provider to route to.
    pub provider: Provider,
    /// Scheduling priority.
    pub priority: Priority,
    /// Total client-side wait budget.
    pub max_wait: Duration,
    /// Delay between status polls.
    pub poll_interval: Duration,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            priority: Priority::default(),
            max_wait: DEFAULT_MAX_WAIT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl ChatOptions {
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

    /// Sets the wait budget.
    #[must_use]
    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait;
        self
    }

    /// Sets the poll interval.
    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

// ============================================================================
// Orchestrator Client
// ============================================================================

/// Client for the AI CLI Orchestrator.
///
/// Holds no state besides its API backend; every status is fetched fresh.
///
/// # Example
///
/// ```ignore
/// use orchestra_client::{ChatOptions, ClientConfig, OrchestratorClient};
///
/// let config = ClientConfig::new("http://localhost:3001/api/v1", "sk_live_abc123");
/// let client = OrchestratorClient::new(&config)?;
///
/// let response = client
///     .await_completion("What is recursion?", &ChatOptions::default())
///     .await?;
/// println!("{}", response.text);
/// ```
#[derive(Debug, Clone)]
pub struct OrchestratorClient<A = HttpApi> {
    api: A,
}

impl OrchestratorClient<HttpApi> {
    /// Creates a client that talks HTTP to the configured orchestrator.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is unusable or the HTTP client
    /// cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self::with_api(HttpApi::new(config)?))
    }
}

impl<A: OrchestratorApi> OrchestratorClient<A> {
    /// Creates a client on top of any API backend.
    pub fn with_api(api: A) -> Self {
        Self { api }
    }

    /// Returns the API backend.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Submits a prompt without waiting for the result.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transport` on network or HTTP failure.
    pub async fn submit(
        &self,
        prompt: &str,
        provider: Provider,
        priority: Priority,
    ) -> Result<RequestHandle, ClientError> {
        let request = ChatRequest {
            prompt: prompt.to_string(),
            provider,
            priority,
        };
        let handle = self.api.submit(&request).await?;
        info!(id = %handle, provider = %request.provider, "Request submitted");
        Ok(handle)
    }

    /// Fetches the current status of a request.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transport` if the handle is unknown to the
    /// server or the server is unreachable.
    pub async fn poll(&self, handle: &RequestHandle) -> Result<RequestStatus, ClientError> {
        self.api.status(handle).await
    }

    /// Submits a prompt and waits for it to finish.
    ///
    /// # Errors
    ///
    /// - `ClientError::RequestFailed` if the orchestrator reports `failed`
    /// - `ClientError::Timeout` if `max_wait` runs out first
    /// - `ClientError::Transport` on any network or HTTP failure
    pub async fn await_completion(
        &self,
        prompt: &str,
        options: &ChatOptions,
    ) -> Result<ChatResponse, ClientError> {
        let handle = self
            .submit(prompt, options.provider.clone(), options.priority)
            .await?;
        self.wait_for(&handle, options.max_wait, options.poll_interval)
            .await
    }

    /// Polls an already submitted request until it finishes or `max_wait`
    /// has elapsed.
    ///
    /// The budget is checked before every poll, so the timeout never fires
    /// early. The task sleeps `poll_interval` between polls.
    ///
    /// # Errors
    ///
    /// Same as [`OrchestratorClient::await_completion`].
    #[instrument(skip(self, handle), fields(id = %handle))]
    pub async fn wait_for(
        &self,
        handle: &RequestHandle,
        max_wait: Duration,
        poll_interval: Duration,
    ) -> Result<ChatResponse, ClientError> {
        let started = Instant::now();
        let mut polls: u32 = 0;

        loop {
            let elapsed = started.elapsed();
            if elapsed >= max_wait {
                warn!(polls, elapsed = ?elapsed, "Gave up waiting for request");
                return Err(ClientError::Timeout { elapsed });
            }

            let status = self.poll(handle).await?;
            polls += 1;

            if let Some(response) = status.to_response() {
                info!(polls, provider = ?response.provider, "Request completed");
                return Ok(response);
            }

            if status.status == RequestState::Failed {
                warn!(polls, error = ?status.error_message, "Request failed");
                return Err(ClientError::RequestFailed {
                    message: status.error_message,
                });
            }

            debug!(state = %status.status, polls, "Request not finished yet");
            sleep(poll_interval).await;
        }
    }

    /// Fetches the quota snapshot for all providers.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transport` on network or HTTP failure.
    pub async fn get_quotas(&self) -> Result<QuotaReport, ClientError> {
        self.api.quotas().await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedApi;
    use orchestra_core::{ProviderQuota, QuotaWindow};

    fn pending() -> RequestStatus {
        RequestStatus::new(RequestState::Pending)
    }

    fn fast_options() -> ChatOptions {
        ChatOptions::default()
            .with_max_wait(Duration::from_secs(10))
            .with_poll_interval(Duration::from_secs(1))
    }

    #[test]
    fn test_chat_option_defaults() {
        let options = ChatOptions::default();
        assert_eq!(options.provider, Provider::Auto);
        assert_eq!(options.priority, Priority::Normal);
        assert_eq!(options.max_wait, Duration::from_secs(120));
        assert_eq!(options.poll_interval, Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_completed_on_nth_poll_stops_polling() {
        let mut completed = RequestStatus::completed("Recursion is self-reference.");
        completed.provider_used = Some("claude".to_string());
        completed.tokens_used = Some(12);
        completed.latency_ms = Some(900);

        let api = ScriptedApi::new().script("q", vec![pending(), pending(), completed]);
        let client = OrchestratorClient::with_api(api);

        let response = client.await_completion("q", &fast_options()).await.unwrap();

        assert_eq!(response.text, "Recursion is self-reference.");
        assert_eq!(response.provider.as_deref(), Some("claude"));
        assert_eq!(response.tokens, Some(12));
        assert_eq!(response.latency_ms, Some(900));
        assert_eq!(client.api().status_calls("q"), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_terminal_times_out_after_max_wait() {
        let api = ScriptedApi::new().script("q", vec![pending()]);
        let client = OrchestratorClient::with_api(api);
        let started = Instant::now();

        let err = client.await_completion("q", &fast_options()).await.unwrap_err();

        let ClientError::Timeout { elapsed } = err else {
            panic!("expected timeout, got {err:?}");
        };
        assert!(elapsed >= Duration::from_secs(10), "timed out early: {elapsed:?}");
        assert!(elapsed <= Duration::from_secs(11), "timed out late: {elapsed:?}");
        assert!(started.elapsed() >= Duration::from_secs(10));
        assert_eq!(client.api().status_calls("q"), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_status_surfaces_message() {
        let api = ScriptedApi::new().script("q", vec![pending(), RequestStatus::failed("rate limited")]);
        let client = OrchestratorClient::with_api(api);

        let err = client.await_completion("q", &fast_options()).await.unwrap_err();

        assert!(err.is_request_failed());
        let ClientError::RequestFailed { message } = err else {
            unreachable!();
        };
        assert_eq!(message.as_deref(), Some("rate limited"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_without_message() {
        let api = ScriptedApi::new().script("q", vec![RequestStatus::new(RequestState::Failed)]);
        let client = OrchestratorClient::with_api(api);

        let err = client.await_completion("q", &fast_options()).await.unwrap_err();
        assert_eq!(err.to_string(), "Request failed: Unknown error");
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_state_keeps_polling() {
        let api = ScriptedApi::new().script(
            "q",
            vec![
                RequestStatus::new(RequestState::Unknown),
                RequestStatus::new(RequestState::Processing),
                RequestStatus::completed("done"),
            ],
        );
        let client = OrchestratorClient::with_api(api);

        let response = client.await_completion("q", &fast_options()).await.unwrap();
        assert_eq!(response.text, "done");
        assert_eq!(client.api().status_calls("q"), 3);
    }

    #[tokio::test]
    async fn test_submit_sends_provider_and_priority() {
        let api = ScriptedApi::new();
        let client = OrchestratorClient::with_api(api);

        let handle = client
            .submit("hello", Provider::DeepSeek, Priority::High)
            .await
            .unwrap();

        assert_eq!(handle.as_str(), "hello");
        let submitted = client.api().submitted();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].provider, Provider::DeepSeek);
        assert_eq!(submitted[0].priority, Priority::High);
    }

    #[tokio::test]
    async fn test_submit_transport_error_propagates() {
        let api = ScriptedApi::new().reject_submit("bad");
        let client = OrchestratorClient::with_api(api);

        let err = client
            .await_completion("bad", &fast_options())
            .await
            .unwrap_err();
        assert!(err.is_transport());
        assert_eq!(client.api().status_calls("bad"), 0);
    }

    #[tokio::test]
    async fn test_get_quotas_passthrough() {
        let mut report = QuotaReport::default();
        report.providers.insert(
            "openai".to_string(),
            ProviderQuota::daily(QuotaWindow::new(10, 100, 90)),
        );
        let client = OrchestratorClient::with_api(ScriptedApi::new().quotas(report.clone()));

        assert_eq!(client.get_quotas().await.unwrap(), report);
    }
}
