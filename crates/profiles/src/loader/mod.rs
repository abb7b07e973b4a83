//! Document loader: resolution, inheritance, merge and validation.
//!
//! Responsibilities:
//! - Build inheritance chains from `extends` references with cycle detection.
//! - Read each layer, lift legacy agent metadata and fold bodies into `system.instruction`.
//! - Merge layers root first and validate the result, aggregating every problem.
//!
//! Does NOT handle:
//! - Caching or deduplicating concurrent loads; wrap `load` for that.
//! - Compiling validated profiles into runtime mount plans.
//!
//! Invariants / Assumptions:
//! - `load` and `load_raw_chain` share one chain walk and always agree on order.
//! - Every failure is terminal to the `load` call that hit it; only `load_many` skips.

mod builder;
mod chain;
mod error;
mod layers;

pub use builder::{AgentLoader, DocumentLoader, ProfileLoader};
pub use chain::InheritanceChain;
pub use error::{LoadError, ValidationReport};
pub use layers::ChainLayer;

#[cfg(test)]
mod tests;
