//! Ordered search directories.
//!
//! Invariants:
//! - Entries are stored lowest precedence first, exactly as supplied.
//! - No two entries are assumed disjoint; one directory may nest inside another.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Where a search directory comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchOrigin {
    /// Documents shipped with the application.
    Bundled,
    /// `~/.amplifier` (or `AMPLIFIER_HOME`).
    User,
    /// `<project>/.amplifier`.
    Project,
    /// Directories supplied explicitly by the caller.
    Custom,
}

impl SearchOrigin {
    pub fn label(self) -> &'static str {
        match self {
            SearchOrigin::Bundled => "bundled",
            SearchOrigin::User => "user",
            SearchOrigin::Project => "project",
            SearchOrigin::Custom => "custom",
        }
    }
}

impl fmt::Display for SearchOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One directory to search, tagged with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    pub dir: PathBuf,
    pub origin: SearchOrigin,
}

/// Search directories, lowest precedence first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPaths {
    entries: Vec<SearchPath>,
}

impl SearchPaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from plain directories, all tagged `Custom`.
    pub fn from_dirs<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            entries: dirs
                .into_iter()
                .map(|dir| SearchPath {
                    dir: dir.into(),
                    origin: SearchOrigin::Custom,
                })
                .collect(),
        }
    }

    /// Append a directory with higher precedence than every existing entry.
    pub fn push(&mut self, dir: impl Into<PathBuf>, origin: SearchOrigin) {
        self.entries.push(SearchPath {
            dir: dir.into(),
            origin,
        });
    }

    pub fn with(mut self, dir: impl Into<PathBuf>, origin: SearchOrigin) -> Self {
        self.push(dir, origin);
        self
    }

    /// Entries in caller order (lowest precedence first).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &SearchPath> {
        self.entries.iter()
    }

    /// Entries highest precedence first.
    pub fn by_precedence(&self) -> impl Iterator<Item = &SearchPath> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Origin of the highest-precedence entry containing `path`.
    pub fn origin_of(&self, path: &Path) -> Option<SearchOrigin> {
        self.by_precedence()
            .find(|entry| path.starts_with(&entry.dir))
            .map(|entry| entry.origin)
    }
}

impl From<Vec<PathBuf>> for SearchPaths {
    fn from(dirs: Vec<PathBuf>) -> Self {
        Self::from_dirs(dirs)
    }
}
