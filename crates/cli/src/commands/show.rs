//! Show command implementation.

use anyhow::{Context, Result};

use super::Output;
use crate::loaders::Loader;

/// What `show` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowMode {
    /// Merged and validated.
    Validated,
    /// Merged, not validated.
    Merged,
    /// Each layer of the chain, unmerged.
    Raw,
}

pub fn run(loader: &Loader, name: &str, mode: ShowMode, output: &Output) -> Result<()> {
    let value = match mode {
        ShowMode::Validated => loader.load_json(name)?,
        ShowMode::Merged => serde_json::to_value(loader.load_merged(name)?)
            .context("Failed to serialize merged document")?,
        ShowMode::Raw => serde_json::to_value(loader.load_raw_chain(name)?)
            .context("Failed to serialize chain layers")?,
    };

    output.emit(&output.formatter().format_value(&value)?)
}
