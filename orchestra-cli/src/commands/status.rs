//! Status command - look up a submitted request once.

use anyhow::Result;
use clap::Args;
use orchestra_core::RequestHandle;

use crate::commands::connect;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the status command.
#[derive(Args)]
pub struct StatusArgs {
    /// Request id printed by `submit`.
    pub id: String,
}

/// Runs the status command.
pub async fn run(args: &StatusArgs, cli: &Cli) -> Result<()> {
    let (client, _) = connect(cli)?;

    let handle = RequestHandle::new(args.id.trim());
    let status = client.poll(&handle).await?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_status(&handle, &status));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&status)?);
        }
    }

    Ok(())
}
