//! Name-to-file lookup.

use std::path::PathBuf;

use super::source::DocumentSource;
use super::{DocumentName, PathResolver};
use crate::collections::is_collection_path;
use crate::constants::DOCUMENT_EXTENSION;
use crate::search::env_var_or_none;

/// A resolved document file and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub path: PathBuf,
    pub source: DocumentSource,
}

impl PathResolver {
    /// Path of the document `name` resolves to, if any.
    ///
    /// Qualified names resolve to `None` when no collection resolver is attached.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        self.locate(name).map(|located| located.path)
    }

    /// Resolved path together with its source.
    pub fn locate(&self, name: &str) -> Option<Located> {
        let located = match DocumentName::parse(name) {
            DocumentName::Qualified {
                collection,
                remainder,
            } => self.locate_qualified(collection, remainder),
            DocumentName::Simple(simple) => self
                .locate_env_override(simple)
                .or_else(|| self.locate_in_search_paths(simple)),
        };

        match &located {
            Some(found) => tracing::debug!(
                kind = %self.kind,
                name,
                path = %found.path.display(),
                source = %found.source,
                "Resolved document"
            ),
            None => tracing::debug!(kind = %self.kind, name, "Document not found"),
        }
        located
    }

    fn locate_qualified(&self, collection: &str, remainder: &str) -> Option<Located> {
        let Some(resolver) = self.collections.as_deref() else {
            tracing::debug!(
                collection,
                "Qualified name without a collection resolver cannot be resolved"
            );
            return None;
        };
        let collection_dir = resolver.resolve(collection)?;
        let subdir = self.kind.subdirectory();

        let exact = collection_dir.join(remainder);
        let mut candidates = vec![exact];

        if !remainder.starts_with(&format!("{}/", subdir)) {
            let file_name = with_extension(remainder);
            candidates.push(collection_dir.join(subdir).join(&file_name));
            if let Some(parent) = collection_dir.parent() {
                candidates.push(parent.join(subdir).join(&file_name));
            }
        }

        candidates.into_iter().find(|c| c.is_file()).map(|path| Located {
            path,
            source: DocumentSource::Collection,
        })
    }

    fn locate_env_override(&self, name: &str) -> Option<Located> {
        let key = self.kind.env_override_key(name);
        let value = env_var_or_none(&key)?;
        let path = PathBuf::from(value);
        if path.is_file() {
            Some(Located {
                path,
                source: DocumentSource::Env,
            })
        } else {
            tracing::warn!(
                variable = %key,
                path = %path.display(),
                "Ignoring override that does not point at a file"
            );
            None
        }
    }

    fn locate_in_search_paths(&self, name: &str) -> Option<Located> {
        let file_name = format!("{}.{}", name, DOCUMENT_EXTENSION);
        self.search_paths.by_precedence().find_map(|search_path| {
            let candidate = search_path.dir.join(&file_name);
            candidate.is_file().then(|| Located {
                source: DocumentSource::Search {
                    origin: search_path.origin,
                    in_collection: is_collection_path(&search_path.dir),
                },
                path: candidate,
            })
        })
    }
}

fn with_extension(name: &str) -> String {
    let suffix = format!(".{}", DOCUMENT_EXTENSION);
    if name.ends_with(&suffix) {
        name.to_string()
    } else {
        format!("{}{}", name, suffix)
    }
}
