//! Centralized constants for document resolution.
//!
//! Filesystem layout and environment names here must stay stable: they are
//! shared with every tool that writes profile or agent documents.

// =============================================================================
// Filesystem Layout
// =============================================================================

/// Extension of every profile and agent document.
pub const DOCUMENT_EXTENSION: &str = "md";

/// File stem skipped when listing documents (compared case-insensitively).
pub const README_STEM: &str = "README";

/// Path segment that marks a directory tree as belonging to a collection.
pub const COLLECTIONS_SEGMENT: &str = "collections";

/// Separator between a collection qualifier and the document name.
pub const QUALIFIER_SEPARATOR: char = ':';

/// Package metadata file that declares a collection's name.
pub const COLLECTION_METADATA_FILE: &str = "pyproject.toml";

/// Per-user and per-project state directory name.
pub const AMPLIFIER_DIR: &str = ".amplifier";

// =============================================================================
// Environment Variables
// =============================================================================

/// Prefix of per-profile path overrides (`AMPLIFIER_PROFILE_<NAME>`).
pub const PROFILE_ENV_PREFIX: &str = "AMPLIFIER_PROFILE_";

/// Prefix of per-agent path overrides (`AMPLIFIER_AGENT_<NAME>`).
pub const AGENT_ENV_PREFIX: &str = "AMPLIFIER_AGENT_";

/// Replaces `~/.amplifier` as the user-level directory.
pub const HOME_ENV: &str = "AMPLIFIER_HOME";

/// Directory holding documents shipped with the application.
pub const BUNDLED_DIR_ENV: &str = "AMPLIFIER_BUNDLED_DIR";

/// Project root whose `.amplifier/` directory is searched.
pub const PROJECT_DIR_ENV: &str = "AMPLIFIER_PROJECT_DIR";

// =============================================================================
// Document Sections
// =============================================================================

/// Top-level sections merged by `module` identity.
pub const MODULE_LIST_SECTIONS: &[&str] = &["hooks", "tools", "providers"];

/// Identity key of a module list entry.
pub const MODULE_ID_KEY: &str = "module";

/// Module entry field that is deep-merged instead of replaced.
pub const MODULE_CONFIG_KEY: &str = "config";

/// Top-level key carrying a child document's exclusion directive.
pub const EXCLUDE_KEY: &str = "exclude";

/// Key inside the metadata section naming the parent document.
pub const EXTENDS_KEY: &str = "extends";

/// Slot the document body is folded into.
pub const BODY_SLOT: &[&str] = &["system", "instruction"];
