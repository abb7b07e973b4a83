//! Structured value tree for document front matter.
//!
//! Responsibilities:
//! - Define the tagged-union `Value` that merge policy pattern-matches on.
//! - Convert parsed YAML into `Value` trees with string keys.
//! - Provide small path helpers used by the loader and validator.
//!
//! Does NOT handle:
//! - Parsing document text (see `document.rs`).
//! - Merge semantics (see `merge/`).
//!
//! Invariants:
//! - A key missing from a `Tree` means "never set"; `Value::Null` means "explicitly null".
//! - `Tree` iteration order is deterministic (sorted by key).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// String-keyed mapping used for every document tree and nested section.
pub type Tree = BTreeMap<String, Value>;

/// A front-matter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Explicit null. In a child document this deletes the inherited value.
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(Tree),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Tree> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut Tree> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Human-readable kind name used in validation messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "mapping",
        }
    }

    /// Convert a parsed YAML value.
    ///
    /// Scalar keys are stringified; sequence or mapping keys are rejected with the
    /// dotted path of the offending mapping.
    pub fn from_yaml(value: serde_yaml::Value) -> Result<Value, String> {
        from_yaml_at(value, "")
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Tree> for Value {
    fn from(value: Tree) -> Self {
        Value::Map(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

fn from_yaml_at(value: serde_yaml::Value, path: &str) -> Result<Value, String> {
    Ok(match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if n.is_u64() {
                return Err(format!(
                    "integer '{}' at '{}' is out of range",
                    n,
                    display_path(path)
                ));
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                return Err(format!("unsupported number '{}' at '{}'", n, display_path(path)));
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => Value::List(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| from_yaml_at(item, &join_path(path, &i.to_string())))
                .collect::<Result<_, _>>()?,
        ),
        serde_yaml::Value::Mapping(mapping) => {
            let mut tree = Tree::new();
            for (key, item) in mapping {
                let key = yaml_key(key).ok_or_else(|| {
                    format!(
                        "mapping keys must be scalars (found a complex key under '{}')",
                        display_path(path)
                    )
                })?;
                let child_path = join_path(path, &key);
                tree.insert(key, from_yaml_at(item, &child_path)?);
            }
            Value::Map(tree)
        }
        serde_yaml::Value::Tagged(tagged) => from_yaml_at(tagged.value, path)?,
    })
}

fn yaml_key(key: serde_yaml::Value) -> Option<String> {
    match key {
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Null => Some("null".to_string()),
        serde_yaml::Value::Tagged(tagged) => yaml_key(tagged.value),
        serde_yaml::Value::Sequence(_) | serde_yaml::Value::Mapping(_) => None,
    }
}

/// Join a dotted path prefix with a field name.
pub(crate) fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() { "<root>" } else { path }
}

/// Look up a value by a sequence of mapping keys.
pub fn get_path<'a>(tree: &'a Tree, path: &[&str]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    let value = tree.get(*first)?;
    if rest.is_empty() {
        Some(value)
    } else {
        get_path(value.as_map()?, rest)
    }
}

/// The first non-mapping value standing on a strict prefix of `path`.
pub(crate) fn blocking_value<'a>(tree: &'a Tree, path: &[&str]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    if rest.is_empty() {
        return None;
    }
    match tree.get(*first)? {
        Value::Map(child) => blocking_value(child, rest),
        other => Some(other),
    }
}

/// Set a value at a sequence of mapping keys, creating intermediate mappings.
///
/// A non-mapping value standing in the way is replaced by a mapping.
pub fn set_path(tree: &mut Tree, path: &[&str], value: Value) {
    let Some((first, rest)) = path.split_first() else {
        return;
    };
    if rest.is_empty() {
        tree.insert(first.to_string(), value);
        return;
    }
    let entry = tree
        .entry(first.to_string())
        .or_insert_with(|| Value::Map(Tree::new()));
    if !matches!(entry, Value::Map(_)) {
        *entry = Value::Map(Tree::new());
    }
    if let Value::Map(child) = entry {
        set_path(child, rest, value);
    }
}
