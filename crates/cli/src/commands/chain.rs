//! Chain command implementation.

use anyhow::Result;

use super::Output;
use crate::formatters::ChainLink;
use crate::loaders::Loader;

pub fn run(loader: &Loader, name: &str, output: &Output) -> Result<()> {
    let links: Vec<ChainLink> = loader
        .load_raw_chain(name)?
        .into_iter()
        .map(|layer| ChainLink {
            name: layer.name,
            path: layer.path,
        })
        .collect();

    output.emit(&output.formatter().format_chain(&links)?)
}
