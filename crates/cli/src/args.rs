//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Map search-path flags and environment variables onto `SearchPathConfig`.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).

use amplifier_profiles::{DocumentKind, SearchPathConfig};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "amplifier-profiles")]
#[command(about = "Resolve, inspect and validate Amplifier profiles and agents", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  amplifier-profiles list\n  amplifier-profiles --kind agent list\n  amplifier-profiles chain dev\n  amplifier-profiles show dev --output yaml\n  amplifier-profiles show foundation:base --raw\n  amplifier-profiles validate\n  amplifier-profiles fragments zen-architect\n"
)]
pub struct Cli {
    /// Document kind to operate on
    #[arg(short, long, global = true, value_enum, default_value_t = KindArg::Profile)]
    pub kind: KindArg,

    /// Output format (table, json, yaml)
    #[arg(short, long, global = true, default_value = "table")]
    pub output: String,

    /// Output file path (saves results to file instead of stdout)
    #[arg(long, global = true, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Directory shipped with the application (holds profiles/, agents/, collections/)
    #[arg(long, global = true, env = "AMPLIFIER_BUNDLED_DIR", value_name = "DIR")]
    pub bundled_dir: Option<PathBuf>,

    /// User-level directory (defaults to ~/.amplifier)
    #[arg(long, global = true, env = "AMPLIFIER_HOME", value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Project root whose .amplifier/ directory is searched (defaults to the working directory)
    #[arg(long, global = true, env = "AMPLIFIER_PROJECT_DIR", value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Extra document directory searched above every other layer (repeatable)
    #[arg(long = "search-dir", global = true, value_name = "DIR")]
    pub search_dirs: Vec<PathBuf>,

    /// Extra directory of installed collections (repeatable)
    #[arg(long = "collections-dir", global = true, value_name = "DIR")]
    pub collections_dirs: Vec<PathBuf>,

    /// Do not search documents inside installed collections by simple name
    #[arg(long, global = true)]
    pub no_collections: bool,

    /// Enable debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Search-path configuration described by the global flags.
    pub fn search_config(&self) -> SearchPathConfig {
        let mut config = SearchPathConfig::new().include_collections(!self.no_collections);
        if let Some(dir) = &self.bundled_dir {
            config = config.with_bundled_dir(dir.clone());
        }
        if let Some(dir) = &self.home {
            config = config.with_user_dir(dir.clone());
        }
        config = config.with_project_root(
            self.project_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(".")),
        );
        for dir in &self.search_dirs {
            config = config.with_extra_dir(dir.clone());
        }
        for dir in &self.collections_dirs {
            config = config.with_collections_dir(dir.clone());
        }
        config
    }
}

/// Document kind selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Profile,
    Agent,
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Profile => DocumentKind::Profile,
            KindArg::Agent => DocumentKind::Agent,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every available document name
    List {
        /// Include the resolved path of each document
        #[arg(long)]
        paths: bool,
    },

    /// Show which file a document name resolves to
    Resolve {
        /// Document name (simple or collection:name)
        name: String,
    },

    /// Show the inheritance chain of a document, root first
    Chain {
        /// Document name (simple or collection:name)
        name: String,
    },

    /// Load a document and print the result
    Show {
        /// Document name (simple or collection:name)
        name: String,

        /// Print the merged tree without validating it
        #[arg(long, conflicts_with = "raw")]
        merged: bool,

        /// Print each unmerged layer of the chain
        #[arg(long)]
        raw: bool,
    },

    /// Validate documents (every listed document when no names are given)
    Validate {
        /// Document names to validate
        names: Vec<String>,
    },

    /// Print mount-plan fragments for agents (every listed agent when no names are given)
    Fragments {
        /// Agent names
        names: Vec<String>,
    },
}
