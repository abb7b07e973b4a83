//! Resolve command implementation.

use amplifier_profiles::LoadError;
use anyhow::Result;

use super::Output;
use crate::formatters::Resolution;
use crate::loaders::Loader;

pub fn run(loader: &Loader, name: &str, output: &Output) -> Result<()> {
    // Qualified names need a collection resolver; the CLI always attaches one.
    let path = loader.resolve(name).ok_or_else(|| LoadError::NotFound {
        kind: loader.kind(),
        name: name.to_string(),
    })?;
    let source = loader
        .source_of(name)
        .map(|s| s.label())
        .unwrap_or_default();

    let resolution = Resolution {
        name: name.to_string(),
        path,
        source,
    };
    output.emit(&output.formatter().format_resolution(&resolution)?)
}
