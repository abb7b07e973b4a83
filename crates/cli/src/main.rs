//! amplifier-profiles - Command-line interface for profile and agent documents.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Build search paths and loaders via the shared `amplifier-profiles` library.
//! - Format and display results in table, JSON or YAML form.
//!
//! Does NOT handle:
//! - Resolution, inheritance or merge rules (see `crates/profiles`).
//! - Installing or updating collections.
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing to allow `.env` to provide clap defaults.
//! - Logs go to stderr so stdout stays machine readable.

mod args;
mod commands;
mod dispatch;
mod error;
mod formatters;
mod loaders;

use amplifier_profiles::load_dotenv;
use args::Cli;
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let exit_code = match run_command(cli) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}
