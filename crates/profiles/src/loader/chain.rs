//! Inheritance chain construction.
//!
//! Invariants:
//! - A chain is never empty and holds no name twice.
//! - Chains are stored root first; the requested document is last.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use super::builder::DocumentLoader;
use super::error::LoadError;
use crate::constants::EXTENDS_KEY;
use crate::document::ParsedDocument;
use crate::resolver::DocumentName;
use crate::schema::Validator;
use crate::value::{Tree, Value, get_path};

/// Document names connected by `extends`, root first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InheritanceChain {
    names: Vec<String>,
}

impl InheritanceChain {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn root(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or_default()
    }

    pub fn leaf(&self) -> &str {
        self.names.last().map(String::as_str).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn into_names(self) -> Vec<String> {
        self.names
    }
}

impl fmt::Display for InheritanceChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names.join(" -> "))
    }
}

/// One document reached while walking a chain.
#[derive(Debug)]
pub(crate) struct ChainDocument {
    pub name: String,
    pub path: PathBuf,
    pub document: ParsedDocument,
}

impl<V: Validator> DocumentLoader<V> {
    /// Names from the root document down to `name`.
    pub fn build_chain(&self, name: &str) -> Result<InheritanceChain, LoadError> {
        let names = self
            .walk_chain(name)?
            .into_iter()
            .map(|doc| doc.name)
            .collect();
        Ok(InheritanceChain { names })
    }

    /// Resolve and parse every document from `name` up to its root, returned root first.
    pub(crate) fn walk_chain(&self, name: &str) -> Result<Vec<ChainDocument>, LoadError> {
        let mut visited: Vec<ChainDocument> = Vec::new();
        let mut current = Some(name.to_string());

        while let Some(next) = current {
            if visited.iter().any(|doc| doc.name == next) {
                let mut chain: Vec<String> = visited.into_iter().map(|doc| doc.name).collect();
                chain.push(next);
                return Err(LoadError::CircularInheritance {
                    kind: self.kind(),
                    chain,
                });
            }

            let path = self.require_path(&next)?;
            let document = self.read_document(&path)?;
            current = self.extends_of(&document.front_matter, &path)?;

            tracing::debug!(
                kind = %self.kind(),
                name = %next,
                path = %path.display(),
                extends = current.as_deref().unwrap_or(""),
                "Walked chain link"
            );
            visited.push(ChainDocument {
                name: next,
                path,
                document,
            });
        }

        visited.reverse();
        Ok(visited)
    }

    /// Resolve `name`, distinguishing a missing collaborator from a missing file.
    pub(crate) fn require_path(&self, name: &str) -> Result<PathBuf, LoadError> {
        if DocumentName::parse(name).is_qualified() && !self.resolver().has_collection_resolver() {
            return Err(LoadError::Misconfigured(format!(
                "{} '{}' uses a collection qualifier but no collection resolver is configured",
                self.kind(),
                name
            )));
        }
        self.resolve(name).ok_or_else(|| LoadError::NotFound {
            kind: self.kind(),
            name: name.to_string(),
        })
    }

    /// Parent named by `<metadata>.extends`; null or blank means none.
    fn extends_of(&self, front_matter: &Tree, path: &Path) -> Result<Option<String>, LoadError> {
        let section = self.kind().metadata_section();
        match get_path(front_matter, &[section, EXTENDS_KEY]) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(parent)) => {
                let parent = parent.trim();
                Ok((!parent.is_empty()).then(|| parent.to_string()))
            }
            Some(other) => Err(LoadError::InvalidDocument {
                path: path.to_path_buf(),
                message: format!(
                    "{}.{} must be a document name, found {}",
                    section,
                    EXTENDS_KEY,
                    other.kind_name()
                ),
            }),
        }
    }
}
