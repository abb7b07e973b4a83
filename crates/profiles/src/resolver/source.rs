//! Where a resolved document comes from.

use serde::{Serialize, Serializer};
use std::fmt;

use super::PathResolver;
use crate::search::SearchOrigin;

/// Origin of a resolved document, as shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentSource {
    /// `AMPLIFIER_<KIND>_<NAME>` override.
    Env,
    /// Reached through a `collection:name` qualifier.
    Collection,
    /// Found by simple name in a search path.
    Search {
        origin: SearchOrigin,
        in_collection: bool,
    },
}

impl DocumentSource {
    /// `env`, `collection`, or the origin label with a `-collection` suffix for
    /// directories inside a collection (`user-collection`).
    pub fn label(&self) -> String {
        match self {
            DocumentSource::Env => "env".to_string(),
            DocumentSource::Collection => "collection".to_string(),
            DocumentSource::Search {
                origin,
                in_collection: false,
            } => origin.label().to_string(),
            DocumentSource::Search {
                origin,
                in_collection: true,
            } => format!("{}-collection", origin.label()),
        }
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl Serialize for DocumentSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl PathResolver {
    /// Source `name` resolves from, or `None` when it does not resolve.
    pub fn source_of(&self, name: &str) -> Option<DocumentSource> {
        self.locate(name).map(|located| located.source)
    }
}
