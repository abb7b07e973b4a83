//! Merge-by-identity for module lists.

use std::collections::HashMap;

use super::merge_maps;
use crate::constants::{MODULE_CONFIG_KEY, MODULE_ID_KEY};
use crate::value::{Tree, Value};

/// Merge two module lists by their `module` identity.
///
/// Parent entries keep their positions with child overrides applied in place;
/// entries introduced by the child follow in child order. Entries sharing an
/// identity fold into one, so identities are unique in the result. Entries
/// without a `module` string are kept as they are.
pub fn merge_module_lists(parent: Vec<Value>, child: Vec<Value>) -> Vec<Value> {
    let mut merged: Vec<Value> = Vec::with_capacity(parent.len() + child.len());
    let mut positions: HashMap<String, usize> = HashMap::new();

    for entry in parent.into_iter().chain(child) {
        let id = module_id(&entry).map(str::to_string);
        match (id, entry) {
            (Some(id), Value::Map(overrides)) => match positions.get(&id) {
                Some(&index) => {
                    if let Value::Map(existing) = &mut merged[index] {
                        let base = std::mem::take(existing);
                        *existing = merge_entry(base, overrides);
                    }
                }
                None => {
                    positions.insert(id, merged.len());
                    merged.push(Value::Map(overrides));
                }
            },
            (_, entry) => merged.push(entry),
        }
    }
    merged
}

fn module_id(entry: &Value) -> Option<&str> {
    entry.as_map()?.get(MODULE_ID_KEY)?.as_str()
}

/// Fold `overrides` into `merged`. `config` is deep-merged; every other field
/// is replaced, and a null field is removed.
fn merge_entry(mut merged: Tree, overrides: Tree) -> Tree {
    for (field, value) in overrides {
        match value {
            Value::Null => {
                merged.remove(&field);
            }
            Value::Map(child_config) if field == MODULE_CONFIG_KEY => {
                let config = match merged.remove(&field) {
                    Some(Value::Map(parent_config)) => {
                        merge_maps(parent_config, child_config, false)
                    }
                    _ => child_config,
                };
                merged.insert(field, Value::Map(config));
            }
            other => {
                merged.insert(field, other);
            }
        }
    }
    merged
}
