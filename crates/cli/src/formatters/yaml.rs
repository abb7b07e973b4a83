//! YAML formatter.

use anyhow::Result;

use super::{ChainLink, DocumentEntry, Formatter, Resolution, ValidationOutcome};

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn format_documents(&self, documents: &[DocumentEntry]) -> Result<String> {
        Ok(serde_yaml::to_string(documents)?)
    }

    fn format_resolution(&self, resolution: &Resolution) -> Result<String> {
        Ok(serde_yaml::to_string(resolution)?)
    }

    fn format_chain(&self, chain: &[ChainLink]) -> Result<String> {
        Ok(serde_yaml::to_string(chain)?)
    }

    fn format_validation(&self, outcomes: &[ValidationOutcome]) -> Result<String> {
        Ok(serde_yaml::to_string(outcomes)?)
    }

    fn format_value(&self, value: &serde_json::Value) -> Result<String> {
        Ok(serde_yaml::to_string(value)?)
    }
}
