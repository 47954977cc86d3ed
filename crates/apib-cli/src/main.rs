//! # apib-lint entry point
//!
//! Parses arguments, installs the tracing subscriber and runs the lint
//! command on a Tokio runtime.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use apib_cli::lint::{run_lint, LintArgs};
use apib_cli::EXIT_OPERATIONAL;

/// Lint the JSON examples and schemas of API Blueprint documents.
#[derive(Parser, Debug)]
#[command(name = "apib-lint", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    lint: LintArgs,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    tracing::debug!(root = %root.display(), "resolved working directory");

    match run_lint(&cli.lint, &root).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_OPERATIONAL)
        }
    }
}
