//! `json-subset` - check that one JSON document is contained in another.
//!
//! Usage:
//!   json-subset [OPTIONS] <CONTAINED> <CONTAINER>
//!
//! Exits with 0 when every key and element of CONTAINED is present in
//! CONTAINER, 1 when something is missing or different (a problems report is
//! written next to CONTAINER), and 2 on unreadable or malformed input.

use std::process::ExitCode;

use clap::Parser;
use json_subset_cli::{run, Cli, EXIT_ERROR};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::debug!(error = ?e, "check aborted");
            eprintln!("error: {e}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
