//! One-shot command line front end over ledger snapshot files.

pub mod args;
mod commands;
pub mod output;
pub mod table;

use std::io::{self, Write};

use clap::Parser;

pub use args::{Cli, Command};

use crate::config::ConfigError;
use crate::errors::LedgerError;
use crate::services::ServiceError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Parses the process arguments and runs the selected command against stdout.
pub fn run_cli() -> Result<(), CliError> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)
}

/// Runs an already parsed command line, writing its report to `out`.
pub fn run<W: Write>(cli: Cli, out: &mut W) -> Result<(), CliError> {
    commands::execute(cli, out)
}
