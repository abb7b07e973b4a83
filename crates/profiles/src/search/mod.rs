//! Search-path configuration.
//!
//! Responsibilities:
//! - Assemble the ordered directories searched for documents and collections.
//! - Read search-related environment variables and optional `.env` files.
//!
//! Does NOT handle:
//! - Looking documents up inside those directories (see `resolver/`).
//!
//! Invariants / Assumptions:
//! - Search paths are ordered lowest precedence first; the last entry wins.
//! - Builder methods take precedence over environment variables when applied after `from_env()`.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

mod builder;
mod env;
mod error;
mod paths;

pub use builder::SearchPathConfig;
pub use env::{env_var_or_none, load_dotenv};
pub use error::ConfigError;
pub use paths::{SearchOrigin, SearchPath, SearchPaths};
