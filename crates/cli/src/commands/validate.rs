//! Validate command implementation.

use amplifier_profiles::LoadError;
use anyhow::Result;
use tracing::{info, warn};

use super::Output;
use crate::formatters::ValidationOutcome;
use crate::loaders::Loader;

/// Validate `names`, or every listed document when `names` is empty.
///
/// Every document is checked before failing. The returned error is the first
/// load failure, so the exit code reflects its category.
pub fn run(loader: &Loader, names: Vec<String>, output: &Output) -> Result<()> {
    let names = if names.is_empty() { loader.list() } else { names };
    info!(kind = %loader.kind(), count = names.len(), "Validating documents");

    let mut outcomes = Vec::with_capacity(names.len());
    let mut first_failure: Option<anyhow::Error> = None;

    for name in names {
        match loader.load_json(&name) {
            Ok(_) => outcomes.push(ValidationOutcome {
                name,
                valid: true,
                problems: Vec::new(),
            }),
            Err(e) => {
                warn!(name = %name, error = %e, "Document failed validation");
                outcomes.push(ValidationOutcome {
                    name,
                    valid: false,
                    problems: problems_of(&e),
                });
                if first_failure.is_none() {
                    first_failure = Some(e);
                }
            }
        }
    }

    output.emit(&output.formatter().format_validation(&outcomes)?)?;

    match first_failure {
        Some(e) => Err(e.context(format!(
            "{} of {} documents failed validation",
            outcomes.iter().filter(|o| !o.valid).count(),
            outcomes.len()
        ))),
        None => Ok(()),
    }
}

/// One line per field problem, or the error message for other failures.
fn problems_of(error: &anyhow::Error) -> Vec<String> {
    match error
        .downcast_ref::<LoadError>()
        .and_then(LoadError::validation_report)
    {
        Some(report) => report.problems.iter().map(|p| p.to_string()).collect(),
        None => vec![error.to_string()],
    }
}
