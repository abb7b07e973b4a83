//! JSON formatter.

use anyhow::Result;
use serde::Serialize;

use super::{ChainLink, DocumentEntry, Formatter, Resolution, ValidationOutcome};

/// Pretty-printed JSON, one document per invocation.
pub struct JsonFormatter;

fn pretty<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut output = serde_json::to_string_pretty(value)?;
    output.push('\n');
    Ok(output)
}

impl Formatter for JsonFormatter {
    fn format_documents(&self, documents: &[DocumentEntry]) -> Result<String> {
        pretty(documents)
    }

    fn format_resolution(&self, resolution: &Resolution) -> Result<String> {
        pretty(resolution)
    }

    fn format_chain(&self, chain: &[ChainLink]) -> Result<String> {
        pretty(chain)
    }

    fn format_validation(&self, outcomes: &[ValidationOutcome]) -> Result<String> {
        pretty(outcomes)
    }

    fn format_value(&self, value: &serde_json::Value) -> Result<String> {
        pretty(value)
    }
}
