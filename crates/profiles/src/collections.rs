//! Collection resolution seam and declared-name discovery.
//!
//! Responsibilities:
//! - Define the `CollectionResolver` trait consumed for `collection:name` lookups.
//! - Discover a collection's declared name from its package metadata.
//! - Provide `DirectoryCollectionResolver`, a filesystem resolver over collection roots.
//!
//! Does NOT handle:
//! - Installing, updating, or fetching collections.
//! - Document lookup inside a collection (see `resolver/path.rs`).
//!
//! Invariants:
//! - Directory names are never used as a collection's name; only the name declared
//!   in `pyproject.toml` (`[project].name`) is authoritative.
//! - Resolution walks collection roots highest precedence (last) first.

use serde::Deserialize;
use std::path::{Component, Path, PathBuf};

use crate::constants::{COLLECTIONS_SEGMENT, COLLECTION_METADATA_FILE};

/// Maps a collection identifier to the directory holding its documents.
pub trait CollectionResolver: Send + Sync {
    /// Directory of the collection named `collection_id`, if installed.
    fn resolve(&self, collection_id: &str) -> Option<PathBuf>;

    /// Declared name of the collection that `path` lives in.
    fn collection_name(&self, path: &Path) -> Option<String> {
        collection_name_from_path(path)
    }
}

#[derive(Deserialize)]
struct PackageMetadata {
    project: Option<ProjectSection>,
}

#[derive(Deserialize)]
struct ProjectSection {
    name: Option<String>,
}

/// Whether `path` contains a `collections` segment.
pub fn is_collection_path(path: &Path) -> bool {
    path.components()
        .any(|c| matches!(c, Component::Normal(s) if s == COLLECTIONS_SEGMENT))
}

/// The directory directly below the last `collections` segment of `path`.
pub fn collection_dir_of(path: &Path) -> Option<PathBuf> {
    let components: Vec<Component<'_>> = path.components().collect();
    let index = components.iter().rposition(
        |c| matches!(c, Component::Normal(s) if *s == COLLECTIONS_SEGMENT),
    )?;
    if index + 1 >= components.len() {
        return None;
    }
    Some(components[..=index + 1].iter().collect())
}

/// Declared name of the collection that `path` belongs to.
///
/// Checks `path` and its ancestors up to the collection directory, then the
/// collection directory's immediate subdirectories (packages that keep their
/// metadata one level down). Returns `None` when no metadata declares a name.
pub fn collection_name_from_path(path: &Path) -> Option<String> {
    let collection_dir = collection_dir_of(path)?;

    for dir in path.ancestors() {
        if let Some(name) = declared_name(dir) {
            return Some(name);
        }
        if dir == collection_dir {
            break;
        }
    }

    sorted_subdirectories(&collection_dir)
        .iter()
        .find_map(|dir| declared_name(dir))
}

/// Read `[project].name` from the metadata file in `dir`.
pub fn declared_name(dir: &Path) -> Option<String> {
    let metadata_path = dir.join(COLLECTION_METADATA_FILE);
    let content = std::fs::read_to_string(&metadata_path).ok()?;
    match toml::from_str::<PackageMetadata>(&content) {
        Ok(metadata) => metadata
            .project
            .and_then(|p| p.name)
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty()),
        Err(e) => {
            tracing::debug!(
                path = %metadata_path.display(),
                error = %e,
                "Ignoring unreadable collection metadata"
            );
            None
        }
    }
}

/// Immediate subdirectories of `dir`, sorted; empty when unreadable.
pub(crate) fn sorted_subdirectories(dir: &Path) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect(),
        Err(_) => Vec::new(),
    };
    dirs.sort();
    dirs
}

/// Resolves collections installed under one or more `collections/` roots.
#[derive(Debug, Clone, Default)]
pub struct DirectoryCollectionResolver {
    roots: Vec<PathBuf>,
}

impl DirectoryCollectionResolver {
    /// Roots are ordered lowest precedence first.
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Find the directory declaring `collection_id` inside `collection_dir`.
    fn declared_dir(collection_dir: &Path, collection_id: &str) -> Option<PathBuf> {
        if declared_name(collection_dir).as_deref() == Some(collection_id) {
            return Some(collection_dir.to_path_buf());
        }
        sorted_subdirectories(collection_dir)
            .into_iter()
            .find(|dir| declared_name(dir).as_deref() == Some(collection_id))
    }
}

impl CollectionResolver for DirectoryCollectionResolver {
    fn resolve(&self, collection_id: &str) -> Option<PathBuf> {
        // An id names a single directory.
        if collection_id.is_empty()
            || collection_id.contains(['/', '\\'])
            || collection_id == "."
            || collection_id == ".."
        {
            return None;
        }

        for root in self.roots.iter().rev() {
            let direct = root.join(collection_id);
            if direct.is_dir() {
                tracing::debug!(
                    collection = collection_id,
                    path = %direct.display(),
                    "Resolved collection by directory"
                );
                return Some(direct);
            }
            for collection_dir in sorted_subdirectories(root) {
                if let Some(found) = Self::declared_dir(&collection_dir, collection_id) {
                    tracing::debug!(
                        collection = collection_id,
                        path = %found.display(),
                        "Resolved collection by declared name"
                    );
                    return Some(found);
                }
            }
        }
        None
    }
}
