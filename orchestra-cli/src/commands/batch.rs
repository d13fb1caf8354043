//! Batch command - run several prompts and print the answers in order.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use orchestra_client::{BatchOptions, DEFAULT_MAX_CONCURRENT};
use orchestra_core::{Priority, Provider};
use tracing::info;

use crate::commands::connect;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Prompts to send.
    pub prompts: Vec<String>,

    /// Read additional prompts from a file, one per line.
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Provider for every prompt.
    #[arg(long, short)]
    pub provider: Option<Provider>,

    /// Priority for every prompt.
    #[arg(long)]
    pub priority: Option<Priority>,

    /// Prompts submitted per admission group.
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENT)]
    pub max_concurrent: usize,
}

/// Runs the batch command.
pub async fn run(args: &BatchArgs, cli: &Cli) -> Result<()> {
    let mut prompts = args.prompts.clone();
    if let Some(path) = &args.file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read prompts from {}", path.display()))?;
        prompts.extend(prompts_from_lines(&content));
    }

    if prompts.is_empty() {
        bail!("No prompts given; pass them as arguments or with --file");
    }

    let (client, settings) = connect(cli)?;

    let options = BatchOptions::default()
        .with_provider(args.provider.clone().unwrap_or(settings.provider))
        .with_priority(args.priority.unwrap_or(settings.priority))
        .with_max_concurrent(args.max_concurrent);

    info!(count = prompts.len(), "Running batch");
    let outcomes = client.batch_outcomes(&prompts, &options).await?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_batch(&prompts, &outcomes));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_batch(&prompts, &outcomes)?);
        }
    }

    Ok(())
}

/// Splits file content into prompts, skipping blank lines.
fn prompts_from_lines(content: &str) -> impl Iterator<Item = String> + '_ {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
}
