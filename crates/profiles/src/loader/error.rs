//! Error types for document loading.
//!
//! Responsibilities:
//! - Define the terminal failures of a single `load` call.
//! - Render aggregated validation failures with every problem, the chain and the leaf file.
//!
//! Invariants:
//! - `ValidationFailed` always carries the complete problem list, never just the first.
//! - Chains are shown root first, joined with ` -> `.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::document::DocumentKind;
use crate::schema::FieldProblem;

/// Errors that can occur while resolving, merging or validating a document.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{kind} '{name}' not found in search paths")]
    NotFound { kind: DocumentKind, name: String },

    #[error("Circular {kind} inheritance detected: {}", .chain.join(" -> "))]
    CircularInheritance { kind: DocumentKind, chain: Vec<String> },

    #[error("Invalid document {}: {message}", .path.display())]
    InvalidDocument { path: PathBuf, message: String },

    #[error("Failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    ValidationFailed(ValidationReport),

    #[error("Misconfigured loader: {0}")]
    Misconfigured(String),
}

impl LoadError {
    /// Validation report, when this is a validation failure.
    pub fn validation_report(&self) -> Option<&ValidationReport> {
        match self {
            LoadError::ValidationFailed(report) => Some(report),
            _ => None,
        }
    }
}

/// Every problem found in a merged document, with the chain that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub kind: DocumentKind,
    /// Requested (leaf) name.
    pub name: String,
    pub problems: Vec<FieldProblem>,
    /// Document names, root first.
    pub chain: Vec<String>,
    /// Resolved path of the leaf document.
    pub leaf_path: PathBuf,
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} '{}' failed validation with {} problem{}:",
            self.kind,
            self.name,
            self.problems.len(),
            if self.problems.len() == 1 { "" } else { "s" }
        )?;
        for problem in &self.problems {
            writeln!(f, "  - {} ({})", problem, problem.kind)?;
        }
        writeln!(f, "Inheritance chain: {}", self.chain.join(" -> "))?;
        write!(f, "File: {}", self.leaf_path.display())
    }
}

impl std::error::Error for ValidationReport {}
