//! HTTP implementation of the orchestrator API.
//!
//! [`HttpApi`] wraps a single `reqwest::Client` (and so a single connection
//! pool) and adds:
//! - Bearer-token authentication on every request
//! - Endpoint URLs built by path segment on the configured base URL
//! - Request/response tracing
//! - Mapping of non-success statuses to [`TransportError::Status`]

use async_trait::async_trait;
use orchestra_core::{ChatRequest, QuotaReport, RequestHandle, RequestStatus};
use reqwest::{header, Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::api::OrchestratorApi;
use crate::config::ClientConfig;
use crate::error::{ClientError, TransportError};

/// User agent string for Orchestra.
const USER_AGENT: &str = concat!("orchestra/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// HTTP API
// ============================================================================

/// Orchestrator API over HTTP/JSON.
#[derive(Clone)]
pub struct HttpApi {
    inner: Client,
    base_url: Url,
    api_key: String,
}

impl HttpApi {
    /// Creates an HTTP API client from a config.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidConfig` for an unusable base URL, or a
    /// transport error if the underlying HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = config.base_url()?;
        let inner = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            inner,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// Returns the base URL requests are issued against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the URL for an endpoint below the base URL.
    ///
    /// Each segment is percent-encoded as a single path segment, and an
    /// empty trailing segment of the base (`/api/`) is dropped first.
    /// Empty, `.` and `..` segments are rejected since they would be
    /// resolved as relative path steps.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::InvalidUrl` if the base URL cannot carry a
    /// path or a segment would not survive as a single segment.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(TransportError::InvalidUrl(format!("invalid path segment {bad:?}")).into());
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| TransportError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Starts an authenticated request to an endpoint.
    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ClientError> {
        let url = self.endpoint(segments)?;
        Ok(self
            .inner
            .request(method, url)
            .bearer_auth(&self.api_key)
            .header(header::ACCEPT, "application/json"))
    }

    /// Sends a request and decodes a successful JSON body.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        debug!(status = %status, "Response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let bytes = response.bytes().await?;
        let value = serde_json::from_slice(&bytes).map_err(TransportError::from)?;
        Ok(value)
    }

    /// Returns the inner reqwest client for advanced operations.
    pub fn inner(&self) -> &Client {
        &self.inner
    }
}

#[async_trait]
impl OrchestratorApi for HttpApi {
    #[instrument(skip(self, request), fields(provider = %request.provider, priority = %request.priority))]
    async fn submit(&self, request: &ChatRequest) -> Result<RequestHandle, ClientError> {
        debug!("POST /chat");
        let builder = self.request(Method::POST, &["chat"])?.json(request);
        self.execute(builder, "/chat").await
    }

    #[instrument(skip(self), fields(id = %handle))]
    async fn status(&self, handle: &RequestHandle) -> Result<RequestStatus, ClientError> {
        debug!("GET /status");
        let builder = self.request(Method::GET, &["status", handle.as_str()])?;
        self.execute(builder, &format!("/status/{handle}")).await
    }

    #[instrument(skip(self))]
    async fn quotas(&self) -> Result<QuotaReport, ClientError> {
        debug!("GET /quotas");
        let builder = self.request(Method::GET, &["quotas"])?;
        self.execute(builder, "/quotas").await
    }
}

impl std::fmt::Debug for HttpApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpApi")
            .field("base_url", &self.base_url.as_str())
            .field("auth_enabled", &!self.api_key.is_empty())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
