//! CLI command implementations.

pub mod batch;
pub mod chat;
pub mod config;
pub mod quotas;
pub mod status;
pub mod submit;

use anyhow::Result;
use orchestra_client::OrchestratorClient;
use tracing::debug;

use crate::settings::{Overrides, Settings};
use crate::Cli;

/// Resolves settings from the global flags.
pub fn settings(cli: &Cli) -> Result<Settings> {
    Settings::load(
        cli.config.as_deref(),
        Overrides {
            api_url: cli.api_url.as_deref(),
            api_key: cli.api_key.as_deref(),
        },
    )
}

/// Resolves settings and builds a client from them.
pub fn connect(cli: &Cli) -> Result<(OrchestratorClient, Settings)> {
    let settings = settings(cli)?;
    let client = OrchestratorClient::new(&settings.client_config()?)?;
    debug!(api_url = %settings.api_url, "Client ready");
    Ok((client, settings))
}
