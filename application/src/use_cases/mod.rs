//! Use cases
//!
//! - [`deliberate`]: the `Parliament` orchestrator
//! - [`statistics`]: per-evaluator statistics over the decision history

pub mod deliberate;
pub mod statistics;
