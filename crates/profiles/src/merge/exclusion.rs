//! `exclude` directives.
//!
//! A child document may strip inherited content from its immediate parent:
//!
//! ```yaml
//! exclude:
//!   hooks: all            # drop the whole section
//!   tools: [tool-web]     # drop entries by `module` identity
//!   session:
//!     context: true       # nested: drop session.context
//! ```
//!
//! A top-level list (`exclude: [hooks, tools]`) drops whole sections.

use std::collections::BTreeMap;
use thiserror::Error;

use crate::constants::{EXCLUDE_KEY, MODULE_ID_KEY};
use crate::value::{Tree, Value, join_path};

/// Keyword that excludes a whole section.
const WHOLE_SECTION: &str = "all";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExclusionError {
    #[error("invalid exclusion at '{path}': expected 'all', true, a list of identifiers or a mapping, found {found}")]
    InvalidRule { path: String, found: &'static str },

    #[error("invalid exclusion at '{path}': identifiers must be strings, found {found}")]
    InvalidIdentifier { path: String, found: &'static str },
}

/// What to remove from one section of the parent.
#[derive(Debug, Clone, PartialEq)]
pub enum Exclusion {
    Whole,
    Identifiers(Vec<String>),
    Nested(ExclusionSpec),
}

/// Parsed `exclude` directive, keyed by section name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExclusionSpec {
    sections: BTreeMap<String, Exclusion>,
}

impl ExclusionSpec {
    pub fn parse(directive: &Value) -> Result<Self, ExclusionError> {
        match directive {
            Value::Null => Ok(Self::default()),
            Value::List(items) => {
                let mut sections = BTreeMap::new();
                for (index, item) in items.iter().enumerate() {
                    let section = item.as_str().ok_or_else(|| ExclusionError::InvalidIdentifier {
                        path: join_path(EXCLUDE_KEY, &index.to_string()),
                        found: item.kind_name(),
                    })?;
                    sections.insert(section.to_string(), Exclusion::Whole);
                }
                Ok(Self { sections })
            }
            Value::Map(tree) => parse_sections(tree, EXCLUDE_KEY),
            other => Err(ExclusionError::InvalidRule {
                path: EXCLUDE_KEY.to_string(),
                found: other.kind_name(),
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &Exclusion)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Whether applying this spec removes the value at `path` or one of its ancestors.
    pub fn removes(&self, path: &[&str]) -> bool {
        let Some((first, rest)) = path.split_first() else {
            return false;
        };
        match self.sections.get(*first) {
            Some(Exclusion::Whole) => true,
            Some(Exclusion::Identifiers(ids)) => {
                rest.first().is_some_and(|key| ids.iter().any(|id| id == key))
            }
            Some(Exclusion::Nested(spec)) => spec.removes(rest),
            None => false,
        }
    }

    /// Remove the excluded content from `tree`.
    pub fn apply(&self, tree: &mut Tree) {
        for (section, exclusion) in &self.sections {
            match exclusion {
                Exclusion::Whole => {
                    if tree.remove(section).is_none() {
                        tracing::debug!(
                            section = %section,
                            "Excluded section not present in parent"
                        );
                    }
                }
                Exclusion::Identifiers(ids) => match tree.get_mut(section) {
                    Some(Value::List(items)) => {
                        items.retain(|item| !matches_identifier(item, ids));
                    }
                    Some(Value::Map(entries)) => {
                        entries.retain(|key, _| !ids.contains(key));
                    }
                    Some(other) => tracing::warn!(
                        section = %section,
                        found = other.kind_name(),
                        "Ignoring identifier exclusion for a section that is not a list or mapping"
                    ),
                    None => tracing::debug!(
                        section = %section,
                        "Excluded section not present in parent"
                    ),
                },
                Exclusion::Nested(spec) => match tree.get_mut(section) {
                    Some(Value::Map(child)) => spec.apply(child),
                    Some(other) => tracing::warn!(
                        section = %section,
                        found = other.kind_name(),
                        "Ignoring nested exclusion for a section that is not a mapping"
                    ),
                    None => tracing::debug!(
                        section = %section,
                        "Excluded section not present in parent"
                    ),
                },
            }
        }
    }
}

fn parse_sections(tree: &Tree, path: &str) -> Result<ExclusionSpec, ExclusionError> {
    let mut sections = BTreeMap::new();
    for (section, rule) in tree {
        let rule_path = join_path(path, section);
        if let Some(exclusion) = parse_rule(rule, &rule_path)? {
            sections.insert(section.clone(), exclusion);
        }
    }
    Ok(ExclusionSpec { sections })
}

/// `None` for rules that exclude nothing (`false`, null).
fn parse_rule(rule: &Value, path: &str) -> Result<Option<Exclusion>, ExclusionError> {
    match rule {
        Value::Bool(true) => Ok(Some(Exclusion::Whole)),
        Value::Bool(false) | Value::Null => Ok(None),
        Value::String(s) if s == WHOLE_SECTION => Ok(Some(Exclusion::Whole)),
        Value::List(items) => {
            let ids = items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    item.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| ExclusionError::InvalidIdentifier {
                            path: join_path(path, &index.to_string()),
                            found: item.kind_name(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Some(Exclusion::Identifiers(ids)))
        }
        Value::Map(tree) => Ok(Some(Exclusion::Nested(parse_sections(tree, path)?))),
        other => Err(ExclusionError::InvalidRule {
            path: path.to_string(),
            found: other.kind_name(),
        }),
    }
}

/// A list item matches by its `module` identity, or by value for plain strings.
fn matches_identifier(item: &Value, ids: &[String]) -> bool {
    let id = match item {
        Value::String(s) => Some(s.as_str()),
        Value::Map(entry) => entry.get(MODULE_ID_KEY).and_then(Value::as_str),
        _ => None,
    };
    id.is_some_and(|id| ids.iter().any(|candidate| candidate == id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(yaml: &str) -> Value {
        Value::from_yaml(serde_yaml::from_str(yaml).unwrap()).unwrap()
    }

    fn tree(yaml: &str) -> Tree {
        match value(yaml) {
            Value::Map(tree) => tree,
            other => panic!("expected mapping, got {}", other.kind_name()),
        }
    }

    #[test]
    fn test_parse_rule_forms() {
        let spec = ExclusionSpec::parse(&value(
            "hooks: all\nproviders: true\ntools: [a, b]\nsession: {context: true}\nagents: false\n",
        ))
        .unwrap();
        let sections: Vec<_> = spec.sections().map(|(k, _)| k.to_string()).collect();
        assert_eq!(sections, vec!["hooks", "providers", "session", "tools"]);
    }

    #[test]
    fn test_top_level_list_excludes_whole_sections() {
        let spec = ExclusionSpec::parse(&value("[hooks, tools]")).unwrap();
        let mut parent = tree("hooks: [{module: a}]\ntools: []\nsession: {}\n");
        spec.apply(&mut parent);
        assert_eq!(parent, tree("session: {}\n"));
    }

    #[test]
    fn test_identifier_exclusion_matches_module_and_plain_strings() {
        let spec =
            ExclusionSpec::parse(&value("tools: [web]\nagents: {include: [helper]}\n")).unwrap();
        let mut parent = tree(
            "tools: [{module: bash}, {module: web}]\nagents: {include: [helper, reviewer]}\n",
        );
        spec.apply(&mut parent);
        assert_eq!(
            parent,
            tree("tools: [{module: bash}]\nagents: {include: [reviewer]}\n")
        );
    }

    #[test]
    fn test_identifier_exclusion_on_mapping_removes_keys() {
        let spec = ExclusionSpec::parse(&value("session: [context]")).unwrap();
        let mut parent =
            tree("session: {orchestrator: {module: loop}, context: {module: simple}}\n");
        spec.apply(&mut parent);
        assert_eq!(parent, tree("session: {orchestrator: {module: loop}}\n"));
    }

    #[test]
    fn test_removes_reports_paths_under_excluded_rules() {
        let spec = ExclusionSpec::parse(&value(
            "hooks: all\nsession: {context: true}\nsystem: [instruction]\n",
        ))
        .unwrap();
        assert!(spec.removes(&["hooks"]));
        assert!(spec.removes(&["hooks", "0"]));
        assert!(spec.removes(&["session", "context", "module"]));
        assert!(!spec.removes(&["session", "orchestrator"]));
        assert!(spec.removes(&["system", "instruction"]));
        assert!(!spec.removes(&["system"]));
        assert!(!spec.removes(&["tools"]));
        assert!(!spec.removes(&[]));
    }

    #[test]
    fn test_missing_sections_are_ignored() {
        let spec = ExclusionSpec::parse(&value("hooks: all\nsession: {context: true}\n")).unwrap();
        let mut parent = tree("tools: []\n");
        spec.apply(&mut parent);
        assert_eq!(parent, tree("tools: []\n"));
    }

    #[test]
    fn test_invalid_rules_name_their_path() {
        let err = ExclusionSpec::parse(&value("session: {context: 5}")).unwrap_err();
        assert_eq!(
            err,
            ExclusionError::InvalidRule {
                path: "exclude.session.context".to_string(),
                found: "integer"
            }
        );

        let err = ExclusionSpec::parse(&value("tools: [ok, {module: x}]")).unwrap_err();
        assert_eq!(
            err,
            ExclusionError::InvalidIdentifier {
                path: "exclude.tools.1".to_string(),
                found: "mapping"
            }
        );

        assert!(ExclusionSpec::parse(&value("hooks: some")).is_err());
        assert!(ExclusionSpec::parse(&value("7")).is_err());
    }
}
