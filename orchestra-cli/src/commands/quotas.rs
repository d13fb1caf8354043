//! Quotas command - show per-provider quota usage.

use anyhow::Result;

use crate::commands::connect;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the quotas command.
pub async fn run(cli: &Cli) -> Result<()> {
    let (client, _) = connect(cli)?;
    let report = client.get_quotas().await?;

    match cli.format {
        OutputFormat::Text => {
            println!("{}", TextFormatter::new(!cli.no_color).format_quotas(&report));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&report)?);
        }
    }

    Ok(())
}
