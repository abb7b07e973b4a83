//! Kind-erased loader used by commands.
//!
//! Responsibilities:
//! - Build a profile or agent loader from the global search-path flags.
//! - Expose the loader operations commands need without naming the validator type.
//!
//! Does NOT handle:
//! - Output formatting (see `formatters`).

use amplifier_profiles::{
    AgentLoader, ChainLayer, DocumentKind, DocumentSource, InheritanceChain, LoadError,
    ProfileLoader, SearchPathConfig, Tree,
};
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

/// A loader for one document kind.
pub enum Loader {
    Profile(ProfileLoader),
    Agent(AgentLoader),
}

/// Dispatch `$body` to whichever loader is active.
macro_rules! with_loader {
    ($self:expr, $loader:ident => $body:expr) => {
        match $self {
            Loader::Profile($loader) => $body,
            Loader::Agent($loader) => $body,
        }
    };
}

impl Loader {
    pub fn new(kind: DocumentKind, config: &SearchPathConfig) -> Self {
        let search_paths = config.build(kind);
        let collections = Arc::new(config.collection_resolver());
        match kind {
            DocumentKind::Profile => Loader::Profile(
                ProfileLoader::profiles(search_paths).with_collection_resolver(collections),
            ),
            DocumentKind::Agent => Loader::Agent(
                AgentLoader::agents(search_paths).with_collection_resolver(collections),
            ),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        with_loader!(self, loader => loader.kind())
    }

    pub fn list(&self) -> Vec<String> {
        with_loader!(self, loader => loader.list())
    }

    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        with_loader!(self, loader => loader.resolve(name))
    }

    pub fn source_of(&self, name: &str) -> Option<DocumentSource> {
        with_loader!(self, loader => loader.source_of(name))
    }

    pub fn build_chain(&self, name: &str) -> Result<InheritanceChain, LoadError> {
        with_loader!(self, loader => loader.build_chain(name))
    }

    pub fn load_raw_chain(&self, name: &str) -> Result<Vec<ChainLayer>, LoadError> {
        with_loader!(self, loader => loader.load_raw_chain(name))
    }

    pub fn load_merged(&self, name: &str) -> Result<Tree, LoadError> {
        with_loader!(self, loader => loader.load_merged(name))
    }

    /// Load and validate `name`, returning the typed result as JSON.
    pub fn load_json(&self, name: &str) -> Result<serde_json::Value> {
        let value = with_loader!(self, loader => serde_json::to_value(loader.load(name)?)?);
        Ok(value)
    }

    /// The agent loader, if this is one.
    pub fn as_agents(&self) -> Option<&AgentLoader> {
        match self {
            Loader::Agent(loader) => Some(loader),
            Loader::Profile(_) => None,
        }
    }
}
