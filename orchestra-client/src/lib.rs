// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Orchestra Client
//!
//! HTTP client for the AI CLI Orchestrator API.
//!
//! The orchestrator exposes three endpoints: `POST /chat` to submit a
//! prompt, `GET /status/{id}` to poll it, and `GET /quotas` to read
//! per-provider quota. This crate wraps them and adds the client-side
//! policies the server does not enforce:
//!
//! - [`OrchestratorClient::await_completion`] - submit, then poll at a fixed
//!   interval until the request finishes or the wait budget runs out
//! - [`OrchestratorClient::batch`] - paced submission of many prompts, then
//!   serial collection in input order
//!
//! ## Layers
//!
//! - [`api::OrchestratorApi`] - The raw protocol as a trait
//! - [`http::HttpApi`] - reqwest implementation with bearer auth
//! - [`client::OrchestratorClient`] - Polling, timeouts and batching
//! - [`config::ClientConfig`] - Base URL, key and request timeout
//!
//! ## Example
//!
//! ```ignore
//! use orchestra_client::{BatchOptions, ClientConfig, OrchestratorClient};
//!
//! let config = ClientConfig::builder()
//!     .api_url("http://localhost:3001/api/v1")
//!     .api_key("sk_live_abc123")
//!     .build()?;
//! let client = OrchestratorClient::new(&config)?;
//!
//! let answers = client
//!     .batch(&["What is AI?", "What is ML?"], &BatchOptions::default())
//!     .await?;
//! ```

pub mod api;
pub mod batch;
pub mod client;
pub mod config;
pub mod error;
pub mod http;

#[cfg(test)]
mod testing;

// Errors
pub use error::{ClientError, TransportError};

// Protocol
pub use api::OrchestratorApi;
pub use http::HttpApi;

// Client
pub use batch::{BatchOptions, BatchOutcome, BATCH_ERROR_PREFIX, DEFAULT_MAX_CONCURRENT};
pub use client::{
    ChatOptions, OrchestratorClient, DEFAULT_MAX_WAIT, DEFAULT_POLL_INTERVAL,
    DEFAULT_POLL_INTERVAL_MS,
};
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_API_URL};

// Wire types
pub use orchestra_core::{
    ChatRequest, ChatResponse, Priority, Provider, QuotaReport, RequestHandle, RequestState,
    RequestStatus,
};
