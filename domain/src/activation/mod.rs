//! Activation primitives
//!
//! - [`EvaluatorId`]: the closed set of seven evaluators and their canonical order
//! - [`ActivationRecord`]: one evaluator's participation in one deliberation
//! - [`Perspective`]: an evaluator's response text paired with its record

mod id;
mod record;

pub use id::EvaluatorId;
pub use record::{ActivationRecord, ContextSnapshot, Perspective};
