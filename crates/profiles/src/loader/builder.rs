//! Document loader builder implementation.
//!
//! Responsibilities:
//! - Provide the builder-pattern `DocumentLoader` that owns the resolver and collaborators.
//! - Drive a load: chain walk, per-layer preparation, merge, then validation.
//! - Load batches of names, isolating per-name failures.
//!
//! Does NOT handle:
//! - Locating files (delegated to `resolver/`).
//! - Merge policy (delegated to `merge/`).
//!
//! Invariants / Assumptions:
//! - Nothing is cached between calls; every `load` reads the filesystem afresh.
//! - Collaborators are optional; a missing collection resolver only affects qualified names.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use super::error::{LoadError, ValidationReport};
use super::layers::ChainLayer;
use crate::collections::CollectionResolver;
use crate::document::{DocumentKind, DocumentReader, FrontMatterReader};
use crate::merge::merge_one;
use crate::mention::MentionExpander;
use crate::resolver::{DocumentSource, PathResolver};
use crate::schema::{AgentValidator, ProfileValidator, Validator};
use crate::search::SearchPaths;
use crate::value::Tree;

/// Loads profiles (`ProfileValidator`) or agents (`AgentValidator`) with inheritance.
pub struct DocumentLoader<V: Validator> {
    validator: V,
    resolver: PathResolver,
    reader: Arc<dyn DocumentReader>,
    mentions: Option<Arc<dyn MentionExpander>>,
}

/// Loader for profiles.
pub type ProfileLoader = DocumentLoader<ProfileValidator>;

/// Loader for agents.
pub type AgentLoader = DocumentLoader<AgentValidator>;

impl<V: Validator> DocumentLoader<V> {
    /// Create a loader over `search_paths` (lowest precedence first).
    pub fn new(validator: V, search_paths: SearchPaths) -> Self {
        let resolver = PathResolver::new(validator.kind(), search_paths);
        Self {
            validator,
            resolver,
            reader: Arc::new(FrontMatterReader),
            mentions: None,
        }
    }

    /// Attach the resolver used for `collection:name` lookups and listing qualifiers.
    pub fn with_collection_resolver(mut self, resolver: Arc<dyn CollectionResolver>) -> Self {
        self.resolver = self.resolver.with_collection_resolver(resolver);
        self
    }

    /// Attach an `@mention` expander for document bodies.
    pub fn with_mention_expander(mut self, expander: Arc<dyn MentionExpander>) -> Self {
        self.mentions = Some(expander);
        self
    }

    /// Replace the default YAML front-matter reader.
    pub fn with_reader(mut self, reader: Arc<dyn DocumentReader>) -> Self {
        self.reader = reader;
        self
    }

    pub fn kind(&self) -> DocumentKind {
        self.resolver.kind()
    }

    pub fn search_paths(&self) -> &SearchPaths {
        self.resolver.search_paths()
    }

    pub(crate) fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub(crate) fn reader(&self) -> &dyn DocumentReader {
        self.reader.as_ref()
    }

    pub(crate) fn mention_expander(&self) -> Option<&dyn MentionExpander> {
        self.mentions.as_deref()
    }

    /// Path `name` resolves to, if any.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        self.resolver.resolve(name)
    }

    /// Every available document name, sorted.
    pub fn list(&self) -> Vec<String> {
        self.resolver.list()
    }

    /// Where `name` resolves from.
    pub fn source_of(&self, name: &str) -> Option<DocumentSource> {
        self.resolver.source_of(name)
    }

    /// Fully merged tree for `name`, before validation.
    pub fn load_merged(&self, name: &str) -> Result<Tree, LoadError> {
        let layers = self.load_raw_chain(name)?;
        Ok(self.merge_layers(layers)?.0)
    }

    /// Resolve, merge and validate `name`.
    pub fn load(&self, name: &str) -> Result<V::Output, LoadError> {
        let layers = self.load_raw_chain(name)?;
        let chain: Vec<String> = layers.iter().map(|layer| layer.name.clone()).collect();
        let (merged, leaf_path) = self.merge_layers(layers)?;

        self.validator.validate(&merged).map_err(|problems| {
            tracing::debug!(
                kind = %self.kind(),
                name,
                problems = problems.len(),
                "Validation failed"
            );
            LoadError::ValidationFailed(ValidationReport {
                kind: self.kind(),
                name: name.to_string(),
                problems,
                chain,
                leaf_path,
            })
        })
    }

    /// Load every name, skipping (and logging) the ones that fail.
    ///
    /// Results keep the order of `names`.
    pub fn load_many<I, S>(&self, names: I) -> Vec<(String, V::Output)>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut loaded = Vec::new();
        let mut skipped = 0usize;

        for name in names {
            let name = name.as_ref();
            match self.load(name) {
                Ok(output) => loaded.push((name.to_string(), output)),
                Err(e) => {
                    skipped += 1;
                    tracing::warn!(
                        kind = %self.kind(),
                        name,
                        error = %e,
                        "Skipping document that failed to load"
                    );
                }
            }
        }

        tracing::info!(
            kind = %self.kind(),
            loaded = loaded.len(),
            skipped,
            "Batch load complete"
        );
        loaded
    }

    /// Fold bodies, then merge root first. Returns the tree and the leaf path.
    fn merge_layers(&self, mut layers: Vec<ChainLayer>) -> Result<(Tree, PathBuf), LoadError> {
        self.fold_bodies(&mut layers);

        let mut merged = Tree::new();
        let mut leaf_path = PathBuf::new();
        for layer in layers {
            merged = merge_one(merged, layer.tree).map_err(|e| LoadError::InvalidDocument {
                path: layer.path.clone(),
                message: e.to_string(),
            })?;
            leaf_path = layer.path;
        }
        Ok((merged, leaf_path))
    }
}

impl ProfileLoader {
    /// Profile loader with the default validator.
    pub fn profiles(search_paths: SearchPaths) -> Self {
        Self::new(ProfileValidator, search_paths)
    }
}

impl AgentLoader {
    /// Agent loader with the default validator.
    pub fn agents(search_paths: SearchPaths) -> Self {
        Self::new(AgentValidator, search_paths)
    }

    /// Mount-plan fragments keyed by agent name, skipping agents that fail to load.
    pub fn load_fragments<I, S>(&self, names: I) -> BTreeMap<String, serde_json::Value>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.load_many(names)
            .into_iter()
            .map(|(name, agent)| (name, agent.to_mount_plan_fragment()))
            .collect()
    }
}
