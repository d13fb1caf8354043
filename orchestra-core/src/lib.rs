// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Orchestra Core
//!
//! Wire types and models for the AI CLI Orchestrator API.
//!
//! This crate holds the plain data exchanged with the orchestrator service.
//! It performs no I/O; the HTTP client lives in `orchestra-client`.
//!
//! ## Key Types
//!
//! ### Requests
//! - [`ChatRequest`] - Body of a `POST /chat` submission
//! - [`Provider`] - Which backend should answer (`auto` or a named provider)
//! - [`Priority`] - Scheduling hint for the orchestrator
//! - [`RequestHandle`] - Opaque id returned on submission
//!
//! ### Status
//! - [`RequestStatus`] - Result of `GET /status/{id}`
//! - [`RequestState`] - Lifecycle state of a submitted request
//! - [`ChatResponse`] - Fields extracted from a completed request
//!
//! ### Quotas
//! - [`QuotaReport`] - Result of `GET /quotas`
//! - [`ProviderQuota`] - Quota windows for one provider
//! - [`QuotaWindow`] - `used` / `limit` / `remaining` counters

pub mod error;
pub mod models;

pub use error::CoreError;

pub use models::{
    // Requests
    ChatRequest,
    Priority,
    Provider,
    RequestHandle,
    // Status
    ChatResponse,
    RequestState,
    RequestStatus,
    // Quotas
    ProviderQuota,
    QuotaReport,
    QuotaWindow,
};
