// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Orchestra CLI - talk to an AI CLI Orchestrator from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Ask a question and wait for the answer
//! orchestra chat "What is recursion? Explain in one sentence."
//!
//! # Pick a provider and priority
//! orchestra chat "Summarize RFC 9110" --provider claude --priority high
//!
//! # Fire and forget, then check later
//! orchestra submit "Long running prompt"
//! orchestra status req_abc123
//!
//! # Quota usage per provider
//! orchestra quotas
//!
//! # Several prompts at once
//! orchestra batch "What is AI?" "What is ML?" --provider deepseek
//!
//! # JSON output
//! orchestra quotas --format json --pretty
//! ```

mod commands;
mod output;
mod settings;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use orchestra_client::ClientError;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{batch, chat, config, quotas, status, submit};

// ============================================================================
// CLI Definition
// ============================================================================

/// Orchestra CLI - AI CLI Orchestrator client.
#[derive(Parser)]
#[command(name = "orchestra")]
#[command(about = "Client for the AI CLI Orchestrator API")]
#[command(long_about = r#"
Orchestra submits prompts to an AI CLI Orchestrator, waits for the
results, and reports per-provider quota.

Connection settings are read from, in order:
  • --api-url / --api-key
  • AI_API_URL / AI_API_KEY
  • the config file (see `orchestra config --path`)

Examples:
  orchestra chat "What is recursion?"      # Submit and wait
  orchestra submit "Long prompt"           # Submit only, print the id
  orchestra status <id>                    # Check a request
  orchestra quotas                         # Quota usage
  orchestra batch "Q1" "Q2" "Q3"           # Several prompts
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Orchestrator base URL (e.g. http://localhost:3001/api/v1).
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// API key sent as a bearer token.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Path to the config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Submit a prompt and wait for the response.
    #[command(visible_alias = "c")]
    Chat(chat::ChatArgs),

    /// Submit a prompt without waiting; prints the request id.
    Submit(submit::SubmitArgs),

    /// Show the status of a submitted request.
    #[command(visible_alias = "s")]
    Status(status::StatusArgs),

    /// Show quota usage for every provider.
    #[command(visible_alias = "q")]
    Quotas,

    /// Run several prompts and print the answers in order.
    #[command(visible_alias = "b")]
    Batch(batch::BatchArgs),

    /// Show configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// The orchestrator reported the request as failed.
    RequestFailed = 2,
    /// Network or HTTP failure.
    Transport = 3,
    /// Gave up waiting.
    Timeout = 4,
}

impl ExitCode {
    /// Picks the exit code for an error.
    fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<ClientError>() {
            Some(ClientError::RequestFailed { .. }) => Self::RequestFailed,
            Some(ClientError::Transport(_)) => Self::Transport,
            Some(ClientError::Timeout { .. }) => Self::Timeout,
            _ => Self::Error,
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("orchestra=debug,info")
    } else {
        EnvFilter::new("orchestra=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Chat(args) => chat::run(args, &cli).await,
        Commands::Submit(args) => submit::run(args, &cli).await,
        Commands::Status(args) => status::run(args, &cli).await,
        Commands::Quotas => quotas::run(&cli).await,
        Commands::Batch(args) => batch::run(args, &cli).await,
        Commands::Config(args) => config::run(args, &cli),
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(ExitCode::for_error(&e) as i32);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use orchestra_client::TransportError;
    use std::time::Duration;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_exit_codes_follow_error_kind() {
        let failed = anyhow::Error::from(ClientError::RequestFailed { message: None });
        assert_eq!(ExitCode::for_error(&failed), ExitCode::RequestFailed);

        let timeout = anyhow::Error::from(ClientError::Timeout {
            elapsed: Duration::from_secs(120),
        });
        assert_eq!(ExitCode::for_error(&timeout), ExitCode::Timeout);

        let transport = anyhow::Error::from(ClientError::from(TransportError::Decode(
            "eof".to_string(),
        )));
        assert_eq!(ExitCode::for_error(&transport), ExitCode::Transport);

        let other = anyhow::anyhow!("no prompts");
        assert_eq!(ExitCode::for_error(&other), ExitCode::Error);
    }

    #[test]
    fn test_parse_chat_arguments() {
        let cli = Cli::try_parse_from([
            "orchestra",
            "chat",
            "hello",
            "--provider",
            "claude",
            "--max-wait",
            "30",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        let Commands::Chat(args) = cli.command else {
            panic!("expected chat command");
        };
        assert_eq!(args.prompt, "hello");
        assert_eq!(args.provider, Some(orchestra_core::Provider::Claude));
        assert_eq!(args.max_wait, 30);
    }

    #[test]
    fn test_chat_defaults_match_client_defaults() {
        let cli = Cli::try_parse_from(["orchestra", "chat", "hello"]).unwrap();
        let Commands::Chat(args) = cli.command else {
            panic!("expected chat command");
        };
        assert_eq!(args.max_wait, orchestra_client::DEFAULT_MAX_WAIT.as_secs());
        assert_eq!(
            Duration::from_millis(args.poll_interval),
            orchestra_client::DEFAULT_POLL_INTERVAL
        );
    }

    #[test]
    fn test_help_names_a_real_config_invocation() {
        use clap::CommandFactory;
        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("orchestra config --path"));

        let cli = Cli::try_parse_from(["orchestra", "config", "--path"]).unwrap();
        let Commands::Config(args) = cli.command else {
            panic!("expected config command");
        };
        assert!(args.path);
    }
}
