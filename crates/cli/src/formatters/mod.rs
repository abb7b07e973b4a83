//! Output formatters for CLI commands.
//!
//! Responsibilities:
//! - Provide table, JSON and YAML output for every command result.
//! - Write output atomically when `--output-file` is given.
//!
//! Does NOT handle:
//! - Direct printing to stdout (returns formatted strings).
//!
//! Invariants:
//! - Tables use tab-separation for consistent alignment in standard terminals.
//! - Empty results are valid empty structures in JSON/YAML and a human message in tables.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

mod json;
mod table;
mod yaml;

pub use json::JsonFormatter;
pub use table::TableFormatter;
pub use yaml::YamlFormatter;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Parse from string.
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            _ => anyhow::bail!(
                "Invalid output format: {}. Valid options: table, json, yaml",
                s
            ),
        }
    }
}

/// One entry of `list`.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentEntry {
    pub name: String,
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Result of `resolve`.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub name: String,
    pub path: PathBuf,
    pub source: String,
}

/// One document of an inheritance chain.
#[derive(Debug, Clone, Serialize)]
pub struct ChainLink {
    pub name: String,
    pub path: PathBuf,
}

/// Result of validating one document.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationOutcome {
    pub name: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub problems: Vec<String>,
}

/// Formatter trait for different output types.
pub trait Formatter {
    fn format_documents(&self, documents: &[DocumentEntry]) -> Result<String>;

    fn format_resolution(&self, resolution: &Resolution) -> Result<String>;

    /// Format a chain, root first.
    fn format_chain(&self, chain: &[ChainLink]) -> Result<String>;

    fn format_validation(&self, outcomes: &[ValidationOutcome]) -> Result<String>;

    /// Format a loaded document, merged tree, layer list or fragment map.
    fn format_value(&self, value: &serde_json::Value) -> Result<String>;
}

/// Get a formatter for the specified format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Yaml => Box::new(YamlFormatter),
    }
}

/// Print `output`, or write it to `output_file` when one is given.
pub fn emit(output: &str, output_file: Option<&Path>) -> Result<()> {
    match output_file {
        Some(path) => {
            write_to_file(output, path)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            eprintln!("Results written to {}", path.display());
        }
        None => print!("{}", output),
    }
    Ok(())
}

/// Write `content` to `path` atomically, creating parent directories.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let parent_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent_dir)
        .with_context(|| format!("Failed to create directory: {}", parent_dir.display()))?;

    let mut temp_file = NamedTempFile::new_in(parent_dir)
        .with_context(|| format!("Failed to create temp file in: {}", parent_dir.display()))?;
    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temp file")?;
    temp_file.flush().context("Failed to flush temp file")?;
    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist {}", path.display()))?;
    Ok(())
}
