//! Document kinds and the front-matter reader.
//!
//! Responsibilities:
//! - Describe the per-kind conventions of profile and agent documents.
//! - Define the `DocumentReader` seam and its default YAML front-matter implementation.
//!
//! Does NOT handle:
//! - Locating documents on disk (see `resolver/`).
//! - Merging or validating parsed trees (see `merge/` and `schema/`).
//!
//! Invariants:
//! - Parsing never fails on missing front matter: the tree is empty and the whole
//!   content is the body.
//! - The body is returned trimmed, or empty when there is none.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::{AGENT_ENV_PREFIX, BODY_SLOT, PROFILE_ENV_PREFIX};
use crate::value::{Tree, Value};

/// The two families of documents the engine resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Profile,
    Agent,
}

impl DocumentKind {
    /// Lowercase label used in messages and on the command line.
    pub fn label(self) -> &'static str {
        match self {
            DocumentKind::Profile => "profile",
            DocumentKind::Agent => "agent",
        }
    }

    /// Conventional subdirectory inside a collection (and inside `.amplifier/`).
    pub fn subdirectory(self) -> &'static str {
        match self {
            DocumentKind::Profile => "profiles",
            DocumentKind::Agent => "agents",
        }
    }

    /// Top-level section holding the document's metadata, including `extends`.
    pub fn metadata_section(self) -> &'static str {
        match self {
            DocumentKind::Profile => "profile",
            DocumentKind::Agent => "meta",
        }
    }

    /// Environment variable that overrides the location of `name`.
    ///
    /// The name is uppercased and `-` becomes `_`: `zen-architect` maps to
    /// `AMPLIFIER_AGENT_ZEN_ARCHITECT`.
    pub fn env_override_key(self, name: &str) -> String {
        let prefix = match self {
            DocumentKind::Profile => PROFILE_ENV_PREFIX,
            DocumentKind::Agent => AGENT_ENV_PREFIX,
        };
        format!("{}{}", prefix, name.to_uppercase().replace('-', "_"))
    }

    /// Field the document body is folded into, if the schema has one.
    pub fn body_slot(self) -> Option<&'static [&'static str]> {
        match self {
            DocumentKind::Profile | DocumentKind::Agent => Some(BODY_SLOT),
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "profile" | "profiles" => Ok(DocumentKind::Profile),
            "agent" | "agents" => Ok(DocumentKind::Agent),
            other => Err(format!(
                "unknown document kind '{}' (expected 'profile' or 'agent')",
                other
            )),
        }
    }
}

/// Structured header plus free-text body of one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocument {
    pub front_matter: Tree,
    pub body: String,
}

/// Errors produced while parsing a document's front matter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("invalid YAML front matter: {0}")]
    Yaml(String),

    #[error("front matter must be a mapping, found {0}")]
    NotAMapping(&'static str),

    #[error("invalid front matter structure: {0}")]
    Structure(String),
}

/// Turns raw document text into a key/value tree and a body.
pub trait DocumentReader: Send + Sync {
    fn parse(&self, content: &str) -> Result<ParsedDocument, ParseError>;
}

/// Reads a YAML block delimited by `---` lines at the top of the document.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrontMatterReader;

impl DocumentReader for FrontMatterReader {
    fn parse(&self, content: &str) -> Result<ParsedDocument, ParseError> {
        let Some((header, body)) = split_front_matter(content) else {
            return Ok(ParsedDocument {
                front_matter: Tree::new(),
                body: content.trim().to_string(),
            });
        };

        let yaml: serde_yaml::Value =
            serde_yaml::from_str(header).map_err(|e| ParseError::Yaml(e.to_string()))?;
        let front_matter = match Value::from_yaml(yaml).map_err(ParseError::Structure)? {
            Value::Null => Tree::new(),
            Value::Map(tree) => tree,
            other => return Err(ParseError::NotAMapping(other.kind_name())),
        };

        Ok(ParsedDocument {
            front_matter,
            body: body.trim().to_string(),
        })
    }
}

/// Split `---` delimited front matter from the body.
///
/// Returns `None` when the document does not open with a `---` line or the
/// block is never closed.
fn split_front_matter(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix("---")?;
    let newline = rest.find('\n')?;
    if !rest[..newline].trim().is_empty() {
        return None;
    }
    let after_open = &rest[newline + 1..];

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some((&after_open[..offset], &after_open[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}
