//! Domain models for Orchestra.
//!
//! ## Submodules
//!
//! - [`request`] - Submission types (ChatRequest, Provider, Priority, RequestHandle)
//! - [`status`] - Polling types (RequestStatus, RequestState, ChatResponse)
//! - [`quota`] - Quota snapshot types (QuotaReport, ProviderQuota, QuotaWindow)

mod quota;
mod request;
mod status;

pub use quota::{ProviderQuota, QuotaReport, QuotaWindow};
pub use request::{ChatRequest, Priority, Provider, RequestHandle};
pub use status::{ChatResponse, RequestState, RequestStatus};
