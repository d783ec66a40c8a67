//! Domain error types
//!
//! A well-formed deliberation never produces these. Every variant describes a
//! broken evaluator contract or an invalid configuration value, and callers
//! are expected to treat them as fatal.

use crate::activation::EvaluatorId;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Evaluator {evaluator} produced strength {strength} outside [0.0, 1.0]")]
    StrengthOutOfRange { evaluator: EvaluatorId, strength: f64 },

    #[error(
        "Evaluator {evaluator} is active (strength {strength:.2} >= threshold {threshold:.2}) but fired no signals"
    )]
    MissingSignals {
        evaluator: EvaluatorId,
        strength: f64,
        threshold: f64,
    },

    #[error(
        "Evaluator {evaluator} is passive (strength {strength:.2} < threshold {threshold:.2}) but fired signals"
    )]
    UnexpectedSignals {
        evaluator: EvaluatorId,
        strength: f64,
        threshold: f64,
    },

    #[error("Synthesis produced an empty decision")]
    EmptySynthesis,

    #[error("Synthesis must be the last evaluator invoked")]
    SynthesisNotLast,

    #[error("Decision trace is missing activations for: {}", format_ids(.missing))]
    IncompleteTrace { missing: Vec<EvaluatorId> },

    #[error("Invalid threshold {threshold} for evaluator {evaluator}")]
    InvalidThreshold { evaluator: EvaluatorId, threshold: f64 },

    #[error("Unknown evaluator: {0}")]
    UnknownEvaluator(String),
}

impl DomainError {
    /// Check if this error comes from an evaluator breaking its contract
    /// (as opposed to a configuration or lookup problem).
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            DomainError::StrengthOutOfRange { .. }
                | DomainError::MissingSignals { .. }
                | DomainError::UnexpectedSignals { .. }
                | DomainError::EmptySynthesis
                | DomainError::SynthesisNotLast
                | DomainError::IncompleteTrace { .. }
        )
    }
}

fn format_ids(ids: &[EvaluatorId]) -> String {
    ids.iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_out_of_range_display() {
        let error = DomainError::StrengthOutOfRange {
            evaluator: EvaluatorId::Reality,
            strength: 1.5,
        };
        assert_eq!(
            error.to_string(),
            "Evaluator reality produced strength 1.5 outside [0.0, 1.0]"
        );
    }

    #[test]
    fn test_incomplete_trace_lists_missing() {
        let error = DomainError::IncompleteTrace {
            missing: vec![EvaluatorId::Memory, EvaluatorId::Synthesis],
        };
        assert_eq!(
            error.to_string(),
            "Decision trace is missing activations for: memory, synthesis"
        );
    }

    #[test]
    fn test_is_contract_violation() {
        assert!(DomainError::EmptySynthesis.is_contract_violation());
        assert!(
            !DomainError::InvalidThreshold {
                evaluator: EvaluatorId::Causality,
                threshold: 2.0
            }
            .is_contract_violation()
        );
        assert!(!DomainError::UnknownEvaluator("x".to_string()).is_contract_violation());
    }
}
