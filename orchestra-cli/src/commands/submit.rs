//! Submit command - queue a prompt without waiting.

use anyhow::Result;
use clap::Args;
use orchestra_core::{Priority, Provider};

use crate::commands::connect;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the submit command.
#[derive(Args)]
pub struct SubmitArgs {
    /// Prompt to send.
    pub prompt: String,

    /// Provider (auto, chatgpt, claude, gemini, deepseek).
    #[arg(long, short)]
    pub provider: Option<Provider>,

    /// Priority (high, normal, low).
    #[arg(long)]
    pub priority: Option<Priority>,
}

/// Runs the submit command.
pub async fn run(args: &SubmitArgs, cli: &Cli) -> Result<()> {
    let (client, settings) = connect(cli)?;

    let handle = client
        .submit(
            &args.prompt,
            args.provider.clone().unwrap_or(settings.provider),
            args.priority.unwrap_or(settings.priority),
        )
        .await?;

    match cli.format {
        OutputFormat::Text => {
            if cli.quiet {
                println!("{handle}");
            } else {
                println!("{}", TextFormatter::new(!cli.no_color).format_handle(&handle));
            }
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&handle)?);
        }
    }

    Ok(())
}
