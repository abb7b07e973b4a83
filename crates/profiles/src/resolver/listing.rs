//! Enumerating every document name across the search paths.

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::Path;

use super::PathResolver;
use crate::collections::{collection_name_from_path, is_collection_path};
use crate::constants::{DOCUMENT_EXTENSION, QUALIFIER_SEPARATOR, README_STEM};

impl PathResolver {
    /// Every document name found in any search path, sorted and deduplicated.
    ///
    /// Documents inside a collection are qualified with the collection's declared
    /// name. A collection without a declared name leaves its documents unqualified.
    pub fn list(&self) -> Vec<String> {
        let mut names = BTreeSet::new();

        for search_path in self.search_paths.iter() {
            let Ok(entries) = std::fs::read_dir(&search_path.dir) else {
                continue;
            };
            let qualifier = if is_collection_path(&search_path.dir) {
                self.collection_name(&search_path.dir)
            } else {
                None
            };

            for entry in entries.flatten() {
                let path = entry.path();
                let Some(stem) = document_stem(&path) else {
                    continue;
                };
                let name = match &qualifier {
                    Some(collection) => format!("{}{}{}", collection, QUALIFIER_SEPARATOR, stem),
                    None => stem.to_string(),
                };
                names.insert(name);
            }
        }

        tracing::debug!(kind = %self.kind, count = names.len(), "Listed documents");
        names.into_iter().collect()
    }

    fn collection_name(&self, dir: &Path) -> Option<String> {
        match self.collections.as_deref() {
            Some(resolver) => resolver.collection_name(dir),
            None => collection_name_from_path(dir),
        }
    }
}

/// Stem of a listable document file; `None` for READMEs and non-documents.
fn document_stem(path: &Path) -> Option<&str> {
    if path.extension() != Some(OsStr::new(DOCUMENT_EXTENSION)) || !path.is_file() {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    if stem.eq_ignore_ascii_case(README_STEM) {
        return None;
    }
    Some(stem)
}
