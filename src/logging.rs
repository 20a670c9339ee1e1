use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::cli::Cli;
use crate::paths::log_file_path;

/// Installs the global subscriber. The TUI owns the terminal, so interactive
/// runs write to a log file instead of stderr.
pub fn init(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("podshelf=debug")
        } else {
            EnvFilter::new("podshelf=info")
        }
    });

    if cli.is_interactive() {
        let path = log_file_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create log directory {}", parent.display())
            })?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(Mutex::new(file)),
            )
            .with(filter)
            .try_init()
            .map_err(|err| anyhow!("failed to initialize logging: {err}"))
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(false)
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .try_init()
            .map_err(|err| anyhow!("failed to initialize logging: {err}"))
    }
}
