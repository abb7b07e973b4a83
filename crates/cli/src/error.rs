//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map LoadError variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.

use amplifier_profiles::LoadError;

/// Structured exit codes for amplifier-profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure, including unreadable files.
    GeneralError = 1,

    /// Document not found in any search path or collection.
    NotFound = 2,

    /// Document exists but its front matter or directives are malformed.
    InvalidDocument = 3,

    /// Merged document failed schema validation.
    ///
    /// Scripts should fix the reported fields; retrying will not help.
    ValidationFailed = 4,

    /// An `extends` chain refers back to itself.
    CircularInheritance = 5,

    /// A collection-qualified name was used without collection support.
    Misconfigured = 6,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&LoadError> for ExitCode {
    fn from(err: &LoadError) -> Self {
        match err {
            LoadError::NotFound { .. } => ExitCode::NotFound,
            LoadError::InvalidDocument { .. } => ExitCode::InvalidDocument,
            LoadError::ValidationFailed(_) => ExitCode::ValidationFailed,
            LoadError::CircularInheritance { .. } => ExitCode::CircularInheritance,
            LoadError::Misconfigured(_) => ExitCode::Misconfigured,
            LoadError::Read { .. } => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no LoadError is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<LoadError>())
            .map(ExitCode::from)
            .unwrap_or(ExitCode::GeneralError)
    }
}
