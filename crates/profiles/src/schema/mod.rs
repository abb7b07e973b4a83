//! Typed profile and agent configurations and their validators.
//!
//! Responsibilities:
//! - Define the immutable typed forms of merged profiles and agents.
//! - Validate merged trees, collecting every field problem in one pass.
//!
//! Does NOT handle:
//! - Merging (see `merge/`); validators only ever see fully merged trees.
//! - Compiling profiles into runtime mount plans.
//!
//! Invariants:
//! - Unknown keys are ignored.
//! - Null values are treated as absent.

mod agent;
mod module;
mod profile;
mod validate;

pub use agent::{Agent, AgentMetadata, AgentValidator};
pub use module::{ModuleConfig, ModuleSource, SystemConfig};
pub use profile::{AgentsConfig, Profile, ProfileMetadata, ProfileValidator, SessionConfig};
pub use validate::{FieldProblem, ProblemKind, Validator};
