//! Fragments command implementation.

use anyhow::{Result, bail};

use super::Output;
use crate::loaders::Loader;

/// Print mount-plan fragments for `names`, or every listed agent when empty.
///
/// Agents that fail to load are skipped with a warning, so a single broken
/// agent never hides the others.
pub fn run(loader: &Loader, names: Vec<String>, output: &Output) -> Result<()> {
    let Some(agents) = loader.as_agents() else {
        bail!("fragments are only available for agents");
    };
    let names = if names.is_empty() { agents.list() } else { names };
    let fragments = agents.load_fragments(&names);

    let value = serde_json::Value::Object(fragments.into_iter().collect());
    output.emit(&output.formatter().format_value(&value)?)
}
