//! Document path resolution.
//!
//! Responsibilities:
//! - Map a simple or `collection:name` document name to a file.
//! - List every document name reachable from the search paths.
//! - Report which source a name resolves from.
//!
//! Does NOT handle:
//! - Reading or merging documents (see `loader/` and `merge/`).
//! - Locating collections on disk (delegated to a `CollectionResolver`).
//!
//! Invariants / Assumptions:
//! - Search paths are walked last to first; the first existing file wins.
//! - A qualifier is resolved only through the collection resolver, never through search paths.
//! - Environment overrides apply to simple names only and must point at an existing file.

mod listing;
mod path;
mod source;

use std::fmt;
use std::sync::Arc;

use crate::collections::CollectionResolver;
use crate::constants::QUALIFIER_SEPARATOR;
use crate::document::DocumentKind;
use crate::search::SearchPaths;

pub use path::Located;
pub use source::DocumentSource;

/// A document name as written by a user or an `extends` reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentName<'a> {
    /// Bare identifier looked up through the search paths.
    Simple(&'a str),
    /// `collection:remainder`, looked up inside a collection.
    Qualified {
        collection: &'a str,
        remainder: &'a str,
    },
}

impl<'a> DocumentName<'a> {
    pub fn parse(name: &'a str) -> Self {
        match name.split_once(QUALIFIER_SEPARATOR) {
            Some((collection, remainder)) => DocumentName::Qualified {
                collection,
                remainder,
            },
            None => DocumentName::Simple(name),
        }
    }

    pub fn is_qualified(&self) -> bool {
        matches!(self, DocumentName::Qualified { .. })
    }
}

/// Resolves document names of one kind against ordered search paths.
#[derive(Clone)]
pub struct PathResolver {
    kind: DocumentKind,
    search_paths: SearchPaths,
    collections: Option<Arc<dyn CollectionResolver>>,
}

impl fmt::Debug for PathResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathResolver")
            .field("kind", &self.kind)
            .field("search_paths", &self.search_paths)
            .field("has_collection_resolver", &self.collections.is_some())
            .finish()
    }
}

impl PathResolver {
    pub fn new(kind: DocumentKind, search_paths: SearchPaths) -> Self {
        Self {
            kind,
            search_paths,
            collections: None,
        }
    }

    pub fn with_collection_resolver(mut self, resolver: Arc<dyn CollectionResolver>) -> Self {
        self.collections = Some(resolver);
        self
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn search_paths(&self) -> &SearchPaths {
        &self.search_paths
    }

    pub fn has_collection_resolver(&self) -> bool {
        self.collections.is_some()
    }
}
