//! Per-layer preparation: reading, legacy agent metadata, and body folding.
//!
//! Body policy: the body of a layer becomes its `system.instruction` unless an
//! explicit instruction is already in effect from this layer or an earlier one.
//! An explicit instruction in front matter therefore wins over every later body,
//! while bodies of later layers replace bodies of earlier ones. An explicit null
//! clears the instruction and suppresses that layer's body. An exclusion that
//! removes the inherited instruction also lifts the pin for that layer.
//!
//! A layer whose slot ancestor is present but not a mapping keeps its front
//! matter as written so validation reports the malformed section.

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::builder::DocumentLoader;
use super::chain::ChainDocument;
use super::error::LoadError;
use crate::constants::EXCLUDE_KEY;
use crate::document::{DocumentKind, ParsedDocument};
use crate::merge::ExclusionSpec;
use crate::mention::{MentionDedup, prepend_fragments};
use crate::schema::Validator;
use crate::value::{Tree, Value, blocking_value, get_path, set_path};

/// One document of a chain after per-layer preparation, before merging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainLayer {
    pub name: String,
    pub path: PathBuf,
    /// Front matter as written, with legacy agent metadata lifted into `meta`.
    pub tree: Tree,
    /// Body text, not yet folded into `tree`.
    pub body: String,
}

impl<V: Validator> DocumentLoader<V> {
    /// Unmerged, unvalidated layers for `name`, root first.
    ///
    /// Uses the same chain walk as `load`, so both always agree on order.
    pub fn load_raw_chain(&self, name: &str) -> Result<Vec<ChainLayer>, LoadError> {
        Ok(self
            .walk_chain(name)?
            .into_iter()
            .map(|doc| self.prepare_layer(doc))
            .collect())
    }

    pub(crate) fn read_document(&self, path: &Path) -> Result<ParsedDocument, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.reader()
            .parse(&content)
            .map_err(|e| LoadError::InvalidDocument {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }

    fn prepare_layer(&self, doc: ChainDocument) -> ChainLayer {
        let ChainDocument {
            name,
            path,
            document,
        } = doc;
        let mut tree = document.front_matter;
        if self.kind() == DocumentKind::Agent {
            lift_legacy_agent_metadata(&mut tree, &name);
        }
        ChainLayer {
            name,
            path,
            tree,
            body: document.body,
        }
    }

    /// Fold each layer's body into its tree according to the body policy.
    pub(crate) fn fold_bodies(&self, layers: &mut [ChainLayer]) {
        let Some(slot) = self.kind().body_slot() else {
            return;
        };
        let mut dedup = MentionDedup::new();
        let mut explicit = false;

        for layer in layers.iter_mut() {
            if excludes_slot(&layer.tree, slot) {
                explicit = false;
            }
            match blocking_value(&layer.tree, slot) {
                Some(Value::Null) => {
                    explicit = false;
                    continue;
                }
                Some(other) => {
                    tracing::debug!(
                        path = %layer.path.display(),
                        found = other.kind_name(),
                        "Body not folded into a section that is not a mapping"
                    );
                    continue;
                }
                None => {}
            }
            match get_path(&layer.tree, slot) {
                Some(Value::Null) => {
                    explicit = false;
                    continue;
                }
                Some(_) => {
                    explicit = true;
                    continue;
                }
                None => {}
            }
            if explicit || layer.body.is_empty() {
                continue;
            }

            let body = self.expand_mentions(&layer.body, &layer.path, &mut dedup);
            set_path(&mut layer.tree, slot, Value::String(body));
        }
    }

    fn expand_mentions(&self, body: &str, path: &Path, dedup: &mut MentionDedup) -> String {
        let Some(expander) = self.mention_expander() else {
            return body.to_string();
        };
        if !expander.has_mentions(body) {
            return body.to_string();
        }
        let relative_to = path.parent().unwrap_or(Path::new("."));
        let fragments = expander.expand(body, relative_to, dedup);
        tracing::debug!(
            path = %path.display(),
            fragments = fragments.len(),
            "Expanded mentions"
        );
        prepend_fragments(&fragments, body)
    }
}

/// Whether the layer's `exclude` directive drops the inherited body slot.
///
/// Malformed directives are reported when the layer is merged.
fn excludes_slot(tree: &Tree, slot: &[&str]) -> bool {
    tree.get(EXCLUDE_KEY)
        .and_then(|directive| ExclusionSpec::parse(directive).ok())
        .is_some_and(|spec| spec.removes(slot))
}

/// Move top-level `name`/`description` into `meta` for agents written without one.
///
/// A missing name defaults to the document name, a missing description to
/// `Agent: <name>`.
fn lift_legacy_agent_metadata(tree: &mut Tree, document_name: &str) {
    if tree.contains_key(DocumentKind::Agent.metadata_section()) {
        return;
    }
    let mut meta = Tree::new();
    let name = match tree.remove("name") {
        Some(Value::Null) | None => Value::String(document_name.to_string()),
        Some(value) => value,
    };
    let description = match tree.remove("description") {
        Some(Value::Null) | None => Value::String(format!("Agent: {}", document_name)),
        Some(value) => value,
    };
    meta.insert("name".to_string(), name);
    meta.insert("description".to_string(), description);
    tree.insert(
        DocumentKind::Agent.metadata_section().to_string(),
        Value::Map(meta),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lift_legacy_agent_metadata() {
        let mut tree = Tree::new();
        tree.insert("name".to_string(), Value::from("explicit"));
        tree.insert("tools".to_string(), Value::List(Vec::new()));
        lift_legacy_agent_metadata(&mut tree, "file-name");

        assert_eq!(get_path(&tree, &["meta", "name"]), Some(&Value::from("explicit")));
        assert_eq!(
            get_path(&tree, &["meta", "description"]),
            Some(&Value::from("Agent: file-name"))
        );
        assert!(!tree.contains_key("name"));
        assert!(tree.contains_key("tools"));
    }

    fn tree(text: &str) -> Tree {
        let value = Value::from_yaml(serde_yaml::from_str(text).unwrap()).unwrap();
        value.as_map().unwrap().clone()
    }

    #[test]
    fn test_excludes_slot_matches_whole_and_nested_rules() {
        let slot = &["system", "instruction"];
        assert!(excludes_slot(&tree("exclude: {system: all}\n"), slot));
        assert!(excludes_slot(&tree("exclude: [system]\n"), slot));
        assert!(excludes_slot(&tree("exclude: {system: {instruction: true}}\n"), slot));
        assert!(excludes_slot(&tree("exclude: {system: [instruction]}\n"), slot));
        assert!(!excludes_slot(&tree("exclude: {hooks: all}\n"), slot));
        assert!(!excludes_slot(&tree("exclude: {system: false}\n"), slot));
        assert!(!excludes_slot(&tree("exclude: 42\n"), slot));
        assert!(!excludes_slot(&tree("tools: []\n"), slot));
    }

    #[test]
    fn test_lift_leaves_modern_agents_alone() {
        let mut meta = Tree::new();
        meta.insert("name".to_string(), Value::from("modern"));
        let mut tree = Tree::new();
        tree.insert("meta".to_string(), Value::Map(meta));
        tree.insert("name".to_string(), Value::from("stray"));
        let before = tree.clone();
        lift_legacy_agent_metadata(&mut tree, "x");
        assert_eq!(tree, before);
    }
}
