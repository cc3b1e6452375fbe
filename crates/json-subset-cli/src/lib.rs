//! `json-subset` command-line tool.
//!
//! Provides the logic behind the binary entry point: load two JSON documents,
//! check that the first is contained in the second, report problems and map
//! the verdict to an exit status.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use json_subset::{Checker, ContainsError, Mode, Options, Outcome, UnsupportedPolicy};
use serde_json::Value;
use thiserror::Error;

/// Exit status when the contained document is present in the container.
pub const EXIT_CONTAINED: u8 = 0;
/// Exit status when at least one mismatch was found.
pub const EXIT_NOT_CONTAINED: u8 = 1;
/// Exit status for unreadable input, malformed JSON and similar usage errors.
pub const EXIT_ERROR: u8 = 2;

// ── Arguments ─────────────────────────────────────────────────────────────

#[derive(Parser, Debug, Clone)]
#[command(
    name = "json-subset",
    version,
    about = "Check that one JSON document is contained in another"
)]
pub struct Cli {
    /// The expected document, whose content must be present
    pub contained: PathBuf,

    /// The actual document, which may hold extra data
    pub container: PathBuf,

    /// Stop at the first problem or report all of them
    #[arg(long, value_enum, default_value_t = ModeArg::FailFast)]
    pub mode: ModeArg,

    /// Treat values outside the JSON model as errors instead of mismatches
    #[arg(long)]
    pub strict: bool,

    /// Where to write the problems report [default: <CONTAINER>_problems.log]
    #[arg(long, value_name = "PATH", conflicts_with = "no_report")]
    pub report: Option<PathBuf>,

    /// Do not write a problems report
    #[arg(long)]
    pub no_report: bool,

    /// Format of the problems report
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Do not print problems to stderr
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    FailFast,
    CollectAll,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::FailFast => Mode::FailFast,
            ModeArg::CollectAll => Mode::CollectAll,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl Cli {
    pub fn options(&self) -> Options {
        let unsupported = if self.strict {
            UnsupportedPolicy::Error
        } else {
            UnsupportedPolicy::Mismatch
        };
        Options::new()
            .with_mode(self.mode.into())
            .with_unsupported(unsupported)
    }

    /// The report destination, or `None` when reports are disabled.
    pub fn report_path(&self) -> Option<PathBuf> {
        if self.no_report {
            return None;
        }
        Some(
            self.report
                .clone()
                .unwrap_or_else(|| default_report_path(&self.container)),
        )
    }

    /// Log filter used when `RUST_LOG` is not set.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not valid JSON: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Contains(#[from] ContainsError),
    #[error("cannot write report {}: {source}", path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

// ── Input ─────────────────────────────────────────────────────────────────

/// Read and parse one JSON document.
pub fn load_document(path: &Path) -> Result<Value, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value = serde_json::from_str(&text).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "loaded document");
    Ok(value)
}

// ── Reporting ─────────────────────────────────────────────────────────────

/// `<container>_problems.log`, next to the container document.
pub fn default_report_path(container: &Path) -> PathBuf {
    let mut name = container.as_os_str().to_os_string();
    name.push("_problems.log");
    PathBuf::from(name)
}

/// Render the report body in the requested format.
pub fn render_report(outcome: &Outcome<'_, Value>, format: ReportFormat) -> Result<String, CliError> {
    match format {
        ReportFormat::Text => Ok(outcome.report()),
        ReportFormat::Json => {
            let mut body = serde_json::to_string_pretty(outcome)?;
            body.push('\n');
            Ok(body)
        }
    }
}

pub fn write_report(
    path: &Path,
    outcome: &Outcome<'_, Value>,
    format: ReportFormat,
) -> Result<(), CliError> {
    let body = render_report(outcome, format)?;
    fs::write(path, body).map_err(|source| CliError::Report {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "wrote problems report");
    Ok(())
}

/// Delete a report left behind by an earlier failing run.
pub fn remove_stale_report(path: &Path) -> Result<(), CliError> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "removed stale problems report");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(CliError::Report {
            path: path.to_path_buf(),
            source,
        }),
    }
}

// ── Command ───────────────────────────────────────────────────────────────

/// Run one check and return the process exit status.
///
/// Problems are echoed to stderr unless `quiet` is set. A report is written
/// only when the document is not contained; a passing run removes any report
/// already at the report path.
pub fn run(cli: &Cli) -> Result<u8, CliError> {
    let contained = load_document(&cli.contained)?;
    let container = load_document(&cli.container)?;

    let outcome = Checker::new(cli.options()).check(&container, &contained)?;
    if outcome.is_contained() {
        tracing::info!(
            contained = %cli.contained.display(),
            container = %cli.container.display(),
            "document is contained"
        );
        if let Some(path) = cli.report_path() {
            remove_stale_report(&path)?;
        }
        return Ok(EXIT_CONTAINED);
    }

    if !cli.quiet {
        for mismatch in outcome.diagnostics() {
            eprintln!("{mismatch}");
        }
    }
    if let Some(path) = cli.report_path() {
        write_report(&path, &outcome, cli.format)?;
    }
    Ok(EXIT_NOT_CONTAINED)
}
