//! Validator seam and field-problem collection.
//!
//! Invariants:
//! - Validators report every problem in one pass; nothing fails fast.
//! - A null value is treated exactly like an absent key.
//! - Problem paths are dotted and use list indices (`tools.1.module`).

use serde::Serialize;
use std::fmt;

use crate::document::DocumentKind;
use crate::value::{Tree, Value, join_path};

/// Turns a merged tree into a typed configuration.
pub trait Validator: Send + Sync {
    type Output;

    /// Kind of document this validator accepts.
    fn kind(&self) -> DocumentKind;

    fn validate(&self, tree: &Tree) -> Result<Self::Output, Vec<FieldProblem>>;
}

/// Category of a field problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemKind {
    Missing,
    WrongType,
    InvalidValue,
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProblemKind::Missing => "missing",
            ProblemKind::WrongType => "wrong type",
            ProblemKind::InvalidValue => "invalid value",
        })
    }
}

/// One problem found in a merged tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldProblem {
    /// Dotted path of the field (e.g. `session.context.module`).
    pub path: String,
    pub kind: ProblemKind,
    pub message: String,
}

impl fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Value at `key`, with null treated as absent.
pub(crate) fn present<'t>(tree: &'t Tree, key: &str) -> Option<&'t Value> {
    tree.get(key).filter(|value| !value.is_null())
}

/// Accumulates problems while a validator walks a tree.
#[derive(Debug, Default)]
pub(crate) struct Problems {
    items: Vec<FieldProblem>,
}

impl Problems {
    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn into_vec(self) -> Vec<FieldProblem> {
        self.items
    }

    pub(crate) fn missing(&mut self, path: String) {
        self.items.push(FieldProblem {
            path,
            kind: ProblemKind::Missing,
            message: "required field is missing".to_string(),
        });
    }

    pub(crate) fn wrong_type(&mut self, path: String, expected: &str, found: &Value) {
        self.items.push(FieldProblem {
            path,
            kind: ProblemKind::WrongType,
            message: format!("expected {}, found {}", expected, found.kind_name()),
        });
    }

    pub(crate) fn invalid(&mut self, path: String, message: String) {
        self.items.push(FieldProblem {
            path,
            kind: ProblemKind::InvalidValue,
            message,
        });
    }

    pub(crate) fn required_map<'t>(
        &mut self,
        tree: &'t Tree,
        prefix: &str,
        key: &str,
    ) -> Option<&'t Tree> {
        let path = join_path(prefix, key);
        match present(tree, key) {
            None => {
                self.missing(path);
                None
            }
            Some(value) => self.expect_map(value, path),
        }
    }

    pub(crate) fn optional_map<'t>(
        &mut self,
        tree: &'t Tree,
        prefix: &str,
        key: &str,
    ) -> Option<&'t Tree> {
        let value = present(tree, key)?;
        self.expect_map(value, join_path(prefix, key))
    }

    fn expect_map<'t>(&mut self, value: &'t Value, path: String) -> Option<&'t Tree> {
        match value {
            Value::Map(map) => Some(map),
            other => {
                self.wrong_type(path, "mapping", other);
                None
            }
        }
    }

    pub(crate) fn required_str(&mut self, tree: &Tree, prefix: &str, key: &str) -> Option<String> {
        let path = join_path(prefix, key);
        match present(tree, key) {
            None => {
                self.missing(path);
                None
            }
            Some(value) => self.expect_str(value, path),
        }
    }

    pub(crate) fn optional_str(&mut self, tree: &Tree, prefix: &str, key: &str) -> Option<String> {
        let value = present(tree, key)?;
        self.expect_str(value, join_path(prefix, key))
    }

    fn expect_str(&mut self, value: &Value, path: String) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            other => {
                self.wrong_type(path, "string", other);
                None
            }
        }
    }

    pub(crate) fn optional_str_list(
        &mut self,
        tree: &Tree,
        prefix: &str,
        key: &str,
    ) -> Option<Vec<String>> {
        let value = present(tree, key)?;
        let path = join_path(prefix, key);
        let Value::List(items) = value else {
            self.wrong_type(path, "list of strings", value);
            return None;
        };

        let before = self.items.len();
        let strings: Vec<String> = items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| self.expect_str(item, join_path(&path, &index.to_string())))
            .collect();
        (self.items.len() == before).then_some(strings)
    }
}
