//! Table formatter.
//!
//! Hierarchical values (loaded documents, layers, fragments) have no natural
//! table shape and are rendered as YAML.

use anyhow::Result;

use super::{ChainLink, DocumentEntry, Formatter, Resolution, ValidationOutcome};

const MISSING: &str = "N/A";

pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_documents(&self, documents: &[DocumentEntry]) -> Result<String> {
        if documents.is_empty() {
            return Ok("No documents found.\n".to_string());
        }

        let with_paths = documents.iter().any(|d| d.path.is_some());
        let mut output = String::from(if with_paths {
            "NAME\tSOURCE\tPATH\n"
        } else {
            "NAME\tSOURCE\n"
        });

        for document in documents {
            output.push_str(&document.name);
            output.push('\t');
            output.push_str(document.source.as_deref().unwrap_or(MISSING));
            if with_paths {
                output.push('\t');
                match &document.path {
                    Some(path) => output.push_str(&path.display().to_string()),
                    None => output.push_str(MISSING),
                }
            }
            output.push('\n');
        }
        Ok(output)
    }

    fn format_resolution(&self, resolution: &Resolution) -> Result<String> {
        Ok(format!(
            "Name: {}\nPath: {}\nSource: {}\n",
            resolution.name,
            resolution.path.display(),
            resolution.source
        ))
    }

    fn format_chain(&self, chain: &[ChainLink]) -> Result<String> {
        let mut output = String::new();
        for (depth, link) in chain.iter().enumerate() {
            output.push_str(&format!(
                "{}. {}\t{}\n",
                depth + 1,
                link.name,
                link.path.display()
            ));
        }
        Ok(output)
    }

    fn format_validation(&self, outcomes: &[ValidationOutcome]) -> Result<String> {
        if outcomes.is_empty() {
            return Ok("No documents found.\n".to_string());
        }

        let mut output = String::new();
        for outcome in outcomes {
            let status = if outcome.valid { "OK" } else { "FAIL" };
            output.push_str(&format!("{}\t{}\n", status, outcome.name));
            for problem in &outcome.problems {
                output.push_str(&format!("  - {}\n", problem));
            }
        }

        let invalid = outcomes.iter().filter(|o| !o.valid).count();
        output.push_str(&format!(
            "\n{} valid, {} invalid\n",
            outcomes.len() - invalid,
            invalid
        ));
        Ok(output)
    }

    fn format_value(&self, value: &serde_json::Value) -> Result<String> {
        Ok(serde_yaml::to_string(value)?)
    }
}
