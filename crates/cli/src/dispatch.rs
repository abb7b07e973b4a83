//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to appropriate command handlers.
//! - Build the loader for the selected document kind once per invocation.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//!
//! Invariants:
//! - Every loader has a collection resolver, so qualified names never report `Misconfigured`.

use amplifier_profiles::DocumentKind;
use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::commands::{self, Output, show::ShowMode};
use crate::loaders::Loader;

/// Dispatch CLI commands to their respective handlers.
pub(crate) fn run_command(cli: Cli) -> Result<()> {
    let output = Output::new(&cli.output, cli.output_file.clone())?;
    // Fragments are an agent-only concept.
    let kind = match cli.command {
        Commands::Fragments { .. } => DocumentKind::Agent,
        _ => cli.kind.into(),
    };
    let loader = Loader::new(kind, &cli.search_config());

    match cli.command {
        Commands::List { paths } => commands::list::run(&loader, paths, &output)?,
        Commands::Resolve { name } => commands::resolve::run(&loader, &name, &output)?,
        Commands::Chain { name } => commands::chain::run(&loader, &name, &output)?,
        Commands::Show { name, merged, raw } => {
            let mode = if raw {
                ShowMode::Raw
            } else if merged {
                ShowMode::Merged
            } else {
                ShowMode::Validated
            };
            commands::show::run(&loader, &name, mode, &output)?;
        }
        Commands::Validate { names } => commands::validate::run(&loader, names, &output)?,
        Commands::Fragments { names } => commands::fragments::run(&loader, names, &output)?,
    }

    Ok(())
}
