//! List command implementation.

use anyhow::Result;
use tracing::info;

use super::Output;
use crate::formatters::DocumentEntry;
use crate::loaders::Loader;

pub fn run(loader: &Loader, paths: bool, output: &Output) -> Result<()> {
    let names = loader.list();
    info!(kind = %loader.kind(), count = names.len(), "Listing documents");

    let entries: Vec<DocumentEntry> = names
        .into_iter()
        .map(|name| DocumentEntry {
            source: loader.source_of(&name).map(|s| s.label()),
            path: if paths { loader.resolve(&name) } else { None },
            name,
        })
        .collect();

    output.emit(&output.formatter().format_documents(&entries)?)
}
