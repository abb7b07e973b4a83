//! Types shared by profiles and agents.

use serde::Serialize;

use super::validate::{Problems, present};
use crate::constants::{MODULE_CONFIG_KEY, MODULE_ID_KEY};
use crate::value::{Tree, Value, join_path};

/// Where a module is loaded from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ModuleSource {
    /// Git URL, file path or package name.
    Uri(String),
    /// Structured source description.
    Structured(Tree),
}

/// One entry of a `providers`, `tools` or `hooks` list, or a session module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleConfig {
    module: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<ModuleSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<Tree>,
}

impl ModuleConfig {
    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn source(&self) -> Option<&ModuleSource> {
        self.source.as_ref()
    }

    pub fn config(&self) -> Option<&Tree> {
        self.config.as_ref()
    }
}

/// System prompt configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemConfig {
    instruction: String,
}

impl SystemConfig {
    pub fn instruction(&self) -> &str {
        &self.instruction
    }
}

pub(crate) fn parse_module(
    problems: &mut Problems,
    entry: &Tree,
    path: &str,
) -> Option<ModuleConfig> {
    let module = problems.required_str(entry, path, MODULE_ID_KEY);

    let source = match present(entry, "source") {
        None => None,
        Some(Value::String(uri)) => Some(ModuleSource::Uri(uri.clone())),
        Some(Value::Map(tree)) => Some(ModuleSource::Structured(tree.clone())),
        Some(other) => {
            problems.wrong_type(join_path(path, "source"), "string or mapping", other);
            None
        }
    };
    let config = problems.optional_map(entry, path, MODULE_CONFIG_KEY).cloned();

    Some(ModuleConfig {
        module: module?,
        source,
        config,
    })
}

/// A required module mapping such as `session.orchestrator`.
pub(crate) fn parse_required_module(
    problems: &mut Problems,
    tree: &Tree,
    prefix: &str,
    key: &str,
) -> Option<ModuleConfig> {
    let entry = problems.required_map(tree, prefix, key)?;
    parse_module(problems, entry, &join_path(prefix, key))
}

/// A module list section; absent means empty.
pub(crate) fn parse_module_list(
    problems: &mut Problems,
    tree: &Tree,
    key: &str,
) -> Vec<ModuleConfig> {
    let Some(value) = present(tree, key) else {
        return Vec::new();
    };
    let Value::List(items) = value else {
        problems.wrong_type(key.to_string(), "list of modules", value);
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let path = join_path(key, &index.to_string());
            match item {
                Value::Map(entry) => parse_module(problems, entry, &path),
                other => {
                    problems.wrong_type(path, "module mapping", other);
                    None
                }
            }
        })
        .collect()
}

/// Optional `system` section. A section with no values counts as absent.
pub(crate) fn parse_system(problems: &mut Problems, tree: &Tree) -> Option<SystemConfig> {
    let system = problems.optional_map(tree, "", "system")?;
    if system.values().all(Value::is_null) {
        return None;
    }
    let instruction = problems.required_str(system, "system", "instruction")?;
    Some(SystemConfig { instruction })
}
