//! Chat command - submit a prompt and wait for the answer.

use std::time::Duration;

use anyhow::Result;
use clap::Args;
use orchestra_client::{ChatOptions, DEFAULT_MAX_WAIT, DEFAULT_POLL_INTERVAL_MS};
use orchestra_core::{Priority, Provider};

use crate::commands::connect;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the chat command.
#[derive(Args)]
pub struct ChatArgs {
    /// Prompt to send.
    pub prompt: String,

    /// Provider (auto, chatgpt, claude, gemini, deepseek).
    #[arg(long, short)]
    pub provider: Option<Provider>,

    /// Priority (high, normal, low).
    #[arg(long)]
    pub priority: Option<Priority>,

    /// Seconds to wait before giving up.
    #[arg(long, default_value_t = DEFAULT_MAX_WAIT.as_secs())]
    pub max_wait: u64,

    /// Milliseconds between status polls.
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    pub poll_interval: u64,
}

/// Runs the chat command.
pub async fn run(args: &ChatArgs, cli: &Cli) -> Result<()> {
    let (client, settings) = connect(cli)?;

    let options = ChatOptions::default()
        .with_provider(args.provider.clone().unwrap_or(settings.provider))
        .with_priority(args.priority.unwrap_or(settings.priority))
        .with_max_wait(Duration::from_secs(args.max_wait))
        .with_poll_interval(Duration::from_millis(args.poll_interval));

    let response = client.await_completion(&args.prompt, &options).await?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            if cli.quiet {
                println!("{}", response.text);
            } else {
                println!("{}", formatter.format_chat(&response));
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&response)?);
        }
    }

    Ok(())
}
