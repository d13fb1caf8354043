//! The orchestrator API seam.
//!
//! [`OrchestratorApi`] is the three-endpoint protocol with no policy on top.
//! [`crate::HttpApi`] speaks it over HTTP; the polling and batching in
//! [`crate::OrchestratorClient`] are written against the trait.

use async_trait::async_trait;
use orchestra_core::{ChatRequest, QuotaReport, RequestHandle, RequestStatus};

use crate::error::ClientError;

/// The raw orchestrator protocol.
///
/// ## Implementing the API
///
/// ```ignore
/// struct Canned;
///
/// #[async_trait]
/// impl OrchestratorApi for Canned {
///     async fn submit(&self, _req: &ChatRequest) -> Result<RequestHandle, ClientError> {
///         Ok(RequestHandle::new("req_1"))
///     }
///
///     async fn status(&self, _handle: &RequestHandle) -> Result<RequestStatus, ClientError> {
///         Ok(RequestStatus::completed("hello"))
///     }
///
///     async fn quotas(&self) -> Result<QuotaReport, ClientError> {
///         Ok(QuotaReport::default())
///     }
/// }
/// ```
#[async_trait]
pub trait OrchestratorApi: Send + Sync {
    /// `POST /chat` - submits a prompt and returns its handle.
    async fn submit(&self, request: &ChatRequest) -> Result<RequestHandle, ClientError>;

    /// `GET /status/{id}` - fetches the current status of a request.
    async fn status(&self, handle: &RequestHandle) -> Result<RequestStatus, ClientError>;

    /// `GET /quotas` - fetches the quota snapshot.
    async fn quotas(&self) -> Result<QuotaReport, ClientError>;
}
