//! Search-path builder.
//!
//! Responsibilities:
//! - Collect the bundled, user, project, collection and extra directories.
//! - Produce the ordered `SearchPaths` for one document kind.
//! - Produce the collection roots and a `DirectoryCollectionResolver` over them.
//!
//! Does NOT handle:
//! - Deciding which document wins (see `resolver/path.rs`).
//!
//! Invariants / Assumptions:
//! - Precedence, lowest first: collection documents, bundled, user, project, extras.
//! - Environment variables only fill fields; builder calls made after `from_env()` win.
//! - A missing home directory drops the user layer with a warning instead of failing.

use anyhow::Context;
use std::path::{Path, PathBuf};

use super::env::env_var_or_none;
use super::paths::{SearchOrigin, SearchPaths};
use crate::collections::{DirectoryCollectionResolver, sorted_subdirectories};
use crate::constants::{
    AMPLIFIER_DIR, BUNDLED_DIR_ENV, COLLECTIONS_SEGMENT, HOME_ENV, PROJECT_DIR_ENV,
};
use crate::document::DocumentKind;

/// Builder for the directories searched for profiles, agents and collections.
#[derive(Debug, Clone)]
pub struct SearchPathConfig {
    bundled_dir: Option<PathBuf>,
    user_dir: Option<PathBuf>,
    use_default_user_dir: bool,
    project_root: Option<PathBuf>,
    extra_dirs: Vec<PathBuf>,
    collections_dirs: Vec<PathBuf>,
    include_collections: bool,
}

impl Default for SearchPathConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchPathConfig {
    /// Create a builder that searches `~/.amplifier` and installed collections.
    pub fn new() -> Self {
        Self {
            bundled_dir: None,
            user_dir: None,
            use_default_user_dir: true,
            project_root: None,
            extra_dirs: Vec::new(),
            collections_dirs: Vec::new(),
            include_collections: true,
        }
    }

    /// Read `AMPLIFIER_HOME`, `AMPLIFIER_BUNDLED_DIR` and `AMPLIFIER_PROJECT_DIR`.
    pub fn from_env(mut self) -> Self {
        if let Some(home) = env_var_or_none(HOME_ENV) {
            self.user_dir = Some(PathBuf::from(home));
        }
        if let Some(bundled) = env_var_or_none(BUNDLED_DIR_ENV) {
            self.bundled_dir = Some(PathBuf::from(bundled));
        }
        if let Some(project) = env_var_or_none(PROJECT_DIR_ENV) {
            self.project_root = Some(PathBuf::from(project));
        }
        self
    }

    /// Directory shipped with the application, holding `profiles/`, `agents/`
    /// and `collections/`.
    pub fn with_bundled_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.bundled_dir = Some(dir.into());
        self
    }

    /// Replace `~/.amplifier` as the user-level directory.
    pub fn with_user_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.user_dir = Some(dir.into());
        self
    }

    /// Skip the user-level directory entirely.
    pub fn without_user_dir(mut self) -> Self {
        self.user_dir = None;
        self.use_default_user_dir = false;
        self
    }

    /// Project root whose `.amplifier/` directory is searched.
    pub fn with_project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = Some(root.into());
        self
    }

    /// Add a document directory above every other layer. Later calls win.
    pub fn with_extra_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.extra_dirs.push(dir.into());
        self
    }

    /// Add a directory of installed collections above the standard roots.
    pub fn with_collections_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.collections_dirs.push(dir.into());
        self
    }

    /// Whether documents inside installed collections are searched by simple name.
    pub fn include_collections(mut self, include: bool) -> Self {
        self.include_collections = include;
        self
    }

    fn resolved_user_dir(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.user_dir {
            return Some(dir.clone());
        }
        if !self.use_default_user_dir {
            return None;
        }
        match default_user_dir() {
            Ok(dir) => Some(dir),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping user-level search directory");
                None
            }
        }
    }

    fn project_dir(&self) -> Option<PathBuf> {
        self.project_root.as_ref().map(|root| root.join(AMPLIFIER_DIR))
    }

    /// Directories holding installed collections, lowest precedence first.
    pub fn collection_roots(&self) -> SearchPaths {
        let mut roots = SearchPaths::new();
        if let Some(bundled) = &self.bundled_dir {
            roots.push(bundled.join(COLLECTIONS_SEGMENT), SearchOrigin::Bundled);
        }
        if let Some(user) = self.resolved_user_dir() {
            roots.push(user.join(COLLECTIONS_SEGMENT), SearchOrigin::User);
        }
        if let Some(project) = self.project_dir() {
            roots.push(project.join(COLLECTIONS_SEGMENT), SearchOrigin::Project);
        }
        for dir in &self.collections_dirs {
            roots.push(dir.clone(), SearchOrigin::Custom);
        }
        roots
    }

    /// Filesystem resolver over `collection_roots()`.
    pub fn collection_resolver(&self) -> DirectoryCollectionResolver {
        DirectoryCollectionResolver::new(
            self.collection_roots().iter().map(|root| root.dir.clone()).collect(),
        )
    }

    /// Ordered search directories for `kind`.
    pub fn build(&self, kind: DocumentKind) -> SearchPaths {
        let subdir = kind.subdirectory();
        let mut paths = SearchPaths::new();

        if self.include_collections {
            for root in self.collection_roots().iter() {
                for dir in collection_document_dirs(&root.dir, subdir) {
                    paths.push(dir, root.origin);
                }
            }
        }
        if let Some(bundled) = &self.bundled_dir {
            paths.push(bundled.join(subdir), SearchOrigin::Bundled);
        }
        if let Some(user) = self.resolved_user_dir() {
            paths.push(user.join(subdir), SearchOrigin::User);
        }
        if let Some(project) = self.project_dir() {
            paths.push(project.join(subdir), SearchOrigin::Project);
        }
        for dir in &self.extra_dirs {
            paths.push(dir.clone(), SearchOrigin::Custom);
        }

        tracing::debug!(kind = %kind, count = paths.len(), "Built search paths");
        paths
    }
}

/// `~/.amplifier` for the current user.
fn default_user_dir() -> anyhow::Result<PathBuf> {
    let base_dirs =
        directories::BaseDirs::new().context("Failed to determine the home directory")?;
    Ok(base_dirs.home_dir().join(AMPLIFIER_DIR))
}

/// `<collection>/<subdir>` and `<collection>/<package>/<subdir>` for every
/// collection under `root`, sorted by path.
fn collection_document_dirs(root: &Path, subdir: &str) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for collection in sorted_subdirectories(root) {
        let direct = collection.join(subdir);
        if direct.is_dir() {
            found.push(direct);
        }
        for package in sorted_subdirectories(&collection) {
            let nested = package.join(subdir);
            if package.file_name().is_some_and(|n| n != subdir) && nested.is_dir() {
                found.push(nested);
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn dirs_with_origin(paths: &SearchPaths) -> Vec<(PathBuf, SearchOrigin)> {
        paths.iter().map(|p| (p.dir.clone(), p.origin)).collect()
    }

    #[test]
    fn test_build_orders_layers_lowest_first() {
        let config = SearchPathConfig::new()
            .with_bundled_dir("/app/data")
            .with_user_dir("/home/u/.amplifier")
            .with_project_root("/work/proj")
            .with_extra_dir("/extra")
            .include_collections(false);

        let paths = config.build(DocumentKind::Profile);
        assert_eq!(
            dirs_with_origin(&paths),
            vec![
                (PathBuf::from("/app/data/profiles"), SearchOrigin::Bundled),
                (PathBuf::from("/home/u/.amplifier/profiles"), SearchOrigin::User),
                (PathBuf::from("/work/proj/.amplifier/profiles"), SearchOrigin::Project),
                (PathBuf::from("/extra"), SearchOrigin::Custom),
            ]
        );
    }

    #[test]
    fn test_without_user_dir_skips_user_layer() {
        let paths = SearchPathConfig::new()
            .without_user_dir()
            .with_project_root("/work/proj")
            .include_collections(false)
            .build(DocumentKind::Agent);
        assert_eq!(
            dirs_with_origin(&paths),
            vec![(PathBuf::from("/work/proj/.amplifier/agents"), SearchOrigin::Project)]
        );
    }

    #[test]
    fn test_collection_roots_follow_layer_order() {
        let roots = SearchPathConfig::new()
            .with_bundled_dir("/app/data")
            .with_user_dir("/home/u/.amplifier")
            .with_collections_dir("/custom/collections")
            .collection_roots();
        let dirs: Vec<_> = roots.iter().map(|r| r.dir.clone()).collect();
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/app/data/collections"),
                PathBuf::from("/home/u/.amplifier/collections"),
                PathBuf::from("/custom/collections"),
            ]
        );
    }

    #[test]
    fn test_collection_document_dirs_cover_flat_and_nested_layouts() {
        let temp = TempDir::new().unwrap();
        let user = temp.path().join("home");
        let collections = user.join("collections");
        fs::create_dir_all(collections.join("flat").join("agents")).unwrap();
        fs::create_dir_all(collections.join("nested").join("pkg").join("agents")).unwrap();
        fs::create_dir_all(collections.join("profiles-only").join("profiles")).unwrap();

        let paths = SearchPathConfig::new()
            .with_user_dir(&user)
            .build(DocumentKind::Agent);
        let dirs = dirs_with_origin(&paths);

        assert_eq!(
            dirs,
            vec![
                (collections.join("flat").join("agents"), SearchOrigin::User),
                (collections.join("nested").join("pkg").join("agents"), SearchOrigin::User),
                (user.join("agents"), SearchOrigin::User),
            ]
        );
    }

    #[test]
    #[serial]
    fn test_from_env_fills_unset_fields() {
        temp_env::with_vars(
            [
                (HOME_ENV, Some("/env/home")),
                (BUNDLED_DIR_ENV, Some("  ")),
                (PROJECT_DIR_ENV, Some("/env/project")),
            ],
            || {
                let paths = SearchPathConfig::new()
                    .from_env()
                    .include_collections(false)
                    .build(DocumentKind::Profile);
                let dirs: Vec<_> = paths.iter().map(|p| p.dir.clone()).collect();
                assert_eq!(
                    dirs,
                    vec![
                        PathBuf::from("/env/home/profiles"),
                        PathBuf::from("/env/project/.amplifier/profiles"),
                    ]
                );
            },
        );
    }

    #[test]
    #[serial]
    fn test_builder_after_from_env_wins() {
        temp_env::with_vars([(HOME_ENV, Some("/env/home"))], || {
            let paths = SearchPathConfig::new()
                .from_env()
                .with_user_dir("/explicit")
                .include_collections(false)
                .build(DocumentKind::Agent);
            assert_eq!(
                paths.iter().next().map(|p| p.dir.clone()),
                Some(PathBuf::from("/explicit/agents"))
            );
        });
    }
}
