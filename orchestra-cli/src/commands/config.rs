//! Config command - show resolved connection settings.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::commands::settings;
use crate::output::JsonFormatter;
use crate::settings::Source;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    /// Only print the config file path.
    #[arg(long)]
    pub path: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfigOutput {
    config_path: String,
    config_exists: bool,
    api_url: String,
    api_url_source: Source,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<String>,
    api_key_source: Source,
    request_timeout_secs: u64,
    provider: String,
    priority: String,
}

/// Runs the config command.
pub fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    let settings = settings(cli)?;

    if args.path {
        match cli.format {
            OutputFormat::Text => println!("{}", settings.config_path.display()),
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "configPath": settings.config_path.display().to_string(),
                });
                println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
            }
        }
        return Ok(());
    }

    let output = ConfigOutput {
        config_path: settings.config_path.display().to_string(),
        config_exists: settings.config_path.exists(),
        api_url: settings.api_url.clone(),
        api_url_source: settings.api_url_source,
        api_key: settings.masked_key(),
        api_key_source: settings.api_key_source,
        request_timeout_secs: settings.request_timeout.as_secs(),
        provider: settings.provider.to_string(),
        priority: settings.priority.to_string(),
    };

    match cli.format {
        OutputFormat::Text => {
            println!("Orchestra Configuration");
            println!("{}", "─".repeat(40));
            println!();
            let exists = if output.config_exists { "" } else { " (not found)" };
            println!("Config file:     {}{exists}", output.config_path);
            println!("API URL:         {} ({:?})", output.api_url, output.api_url_source);
            match &output.api_key {
                Some(key) => println!("API key:         {key} ({:?})", output.api_key_source),
                None => println!("API key:         not set"),
            }
            println!("Request timeout: {}s", output.request_timeout_secs);
            println!("Provider:        {}", output.provider);
            println!("Priority:        {}", output.priority);
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
        }
    }

    Ok(())
}
