//! Inheritance merge engine.
//!
//! Responsibilities:
//! - Fold a root-to-leaf sequence of document trees into one tree.
//! - Merge module-list sections (`hooks`, `tools`, `providers`) by `module` identity.
//! - Apply a child's `exclude` directive to its immediate parent before merging.
//!
//! Does NOT handle:
//! - Reading documents or building the chain (see `loader/`).
//! - Validating the merged tree (see `schema/`).
//!
//! Invariants:
//! - Merging a single tree returns that tree unchanged (minus any `exclude` directive).
//! - An explicit null in a child removes the inherited key; against a key the parent
//!   never set, the null is kept so that "set to null" stays visible.
//! - The `exclude` directive never appears in a merged tree.
//! - Merging is pure: the same inputs always give the same output.

mod exclusion;
mod module_list;

use crate::constants::{EXCLUDE_KEY, MODULE_LIST_SECTIONS};
use crate::value::{Tree, Value};

pub use exclusion::{Exclusion, ExclusionError, ExclusionSpec};
pub use module_list::merge_module_lists;

/// Fold `layers` root first into a single tree.
pub fn merge_chain<I>(layers: I) -> Result<Tree, ExclusionError>
where
    I: IntoIterator<Item = Tree>,
{
    layers
        .into_iter()
        .try_fold(Tree::new(), |merged, layer| merge_one(merged, layer))
}

/// Merge one child tree over its parent.
///
/// The child's `exclude` directive, if any, is applied to `parent` first and
/// then dropped.
pub fn merge_one(mut parent: Tree, mut child: Tree) -> Result<Tree, ExclusionError> {
    if let Some(directive) = child.remove(EXCLUDE_KEY) {
        let spec = ExclusionSpec::parse(&directive)?;
        spec.apply(&mut parent);
    }
    Ok(merge_maps(parent, child, true))
}

/// Key-by-key merge. Module-list sections are recognized only at the top level.
pub(crate) fn merge_maps(mut base: Tree, overlay: Tree, top_level: bool) -> Tree {
    for (key, overlay_value) in overlay {
        match overlay_value {
            Value::Null => {
                if base.remove(&key).is_none() {
                    base.insert(key, Value::Null);
                }
            }
            Value::List(child_items) if top_level && is_module_list_section(&key) => {
                let parent_items = match base.remove(&key) {
                    Some(Value::List(items)) => items,
                    _ => Vec::new(),
                };
                base.insert(
                    key,
                    Value::List(merge_module_lists(parent_items, child_items)),
                );
            }
            Value::Map(child_map) => {
                let merged = match base.remove(&key) {
                    Some(Value::Map(parent_map)) => merge_maps(parent_map, child_map, false),
                    _ => child_map,
                };
                base.insert(key, Value::Map(merged));
            }
            other => {
                base.insert(key, other);
            }
        }
    }
    base
}

fn is_module_list_section(key: &str) -> bool {
    MODULE_LIST_SECTIONS.contains(&key)
}
