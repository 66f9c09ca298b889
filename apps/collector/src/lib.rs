//! # Collector
//!
//! Command-line entry point: loads the configuration document, builds the
//! registry with the built-in kinds, and reports what it found.
//!
//! ## Example
//! ```no_run
//! use clap::Parser;
//! use collector_app::{Cli, run};
//!
//! let cli = Cli::parse_from(["collector", "--config", "collector.toml", "--check"]);
//! let code = run(&cli, &mut std::io::stdout(), &mut std::io::stderr())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use collector::build_registry;
use collector::kernel::config::load_document;
use collector_logger::LevelFilter;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

/// Builds inputs and outputs from a configuration document.
#[derive(Debug, Parser)]
#[command(name = "collector", version, about)]
pub struct Cli {
    /// Configuration document. Defaults to `collector.*` in the working directory.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Validate the document, print a summary, and exit.
    #[arg(long)]
    pub check: bool,

    /// Minimum log level (`RUST_LOG` takes precedence).
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: LevelFilter,

    /// Log JSON lines instead of the compact format.
    #[arg(long)]
    pub json: bool,

    /// Also write rolling log files into this directory.
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

/// Loads the document and builds the registry.
///
/// An invalid registry prints one error per line to `err` and yields
/// [`ExitCode::FAILURE`]. With `--check`, a valid registry prints its summary to `out`.
///
/// # Errors
/// Returns an error if the document cannot be loaded or a writer fails.
pub fn run(cli: &Cli, out: &mut impl Write, err: &mut impl Write) -> Result<ExitCode> {
    let document =
        load_document(cli.config.as_deref()).context("Critical: Configuration document could not be loaded")?;

    let registry = build_registry(&document);
    let summary = registry.summary();

    if !registry.is_valid() {
        warn!(%summary, "Configuration rejected");
        for message in registry.error_messages() {
            writeln!(err, "{message}")?;
        }
        return Ok(ExitCode::FAILURE);
    }

    if cli.check {
        writeln!(out, "Configuration OK: {summary}")?;
        return Ok(ExitCode::SUCCESS);
    }

    for key in registry.services().sorted_keys() {
        info!(service = %key, "Service ready");
    }
    info!(%summary, "Collector configured");

    Ok(ExitCode::SUCCESS)
}
