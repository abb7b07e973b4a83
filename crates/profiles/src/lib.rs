//! Resolution, inheritance and merge engine for Amplifier profiles and agents.
//!
//! Profiles and agents are Markdown documents with YAML front matter. A document
//! may extend a parent; this crate finds documents across ordered search paths
//! and collections, walks `extends` chains, merges the layers root first and
//! validates the result into typed configurations.
//!
//! ```no_run
//! use amplifier_profiles::{ProfileLoader, SearchPathConfig, DocumentKind};
//! use std::sync::Arc;
//!
//! let config = SearchPathConfig::new().from_env().with_project_root(".");
//! let loader = ProfileLoader::profiles(config.build(DocumentKind::Profile))
//!     .with_collection_resolver(Arc::new(config.collection_resolver()));
//! let profile = loader.load("dev")?;
//! println!("{}", profile.metadata().description());
//! # Ok::<(), amplifier_profiles::LoadError>(())
//! ```

pub mod collections;
pub mod constants;
pub mod document;
mod loader;
pub mod merge;
pub mod mention;
pub mod resolver;
pub mod schema;
pub mod search;
pub mod value;

pub use collections::{CollectionResolver, DirectoryCollectionResolver, collection_name_from_path};
pub use document::{DocumentKind, DocumentReader, FrontMatterReader, ParseError, ParsedDocument};
pub use loader::{
    AgentLoader, ChainLayer, DocumentLoader, InheritanceChain, LoadError, ProfileLoader,
    ValidationReport,
};
pub use merge::{ExclusionError, ExclusionSpec, merge_chain, merge_one};
pub use mention::{MentionDedup, MentionExpander};
pub use resolver::{DocumentName, DocumentSource, PathResolver};
pub use schema::{
    Agent, AgentValidator, FieldProblem, ModuleConfig, ModuleSource, ProblemKind, Profile,
    ProfileValidator, Validator,
};
pub use search::{
    ConfigError, SearchOrigin, SearchPath, SearchPathConfig, SearchPaths, load_dotenv,
};
pub use value::{Tree, Value};
