//! Activation record value object

use super::id::EvaluatorId;
use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Shallow, evaluator-specific mapping of the facts an evaluator used.
///
/// Kept for audit only; nothing re-executes from it.
pub type ContextSnapshot = BTreeMap<String, serde_json::Value>;

/// One evaluator's participation in one deliberation (Value Object)
///
/// Construction goes through [`ActivationRecord::new`], which enforces the
/// activation contract:
/// - `strength` is a finite number in `[0.0, 1.0]`
/// - `fired_signals` is non-empty exactly when `strength >= threshold`
///
/// # Example
///
/// ```
/// use parliament_domain::{ActivationRecord, ContextSnapshot, EvaluatorId};
///
/// let record = ActivationRecord::new(
///     EvaluatorId::Reality,
///     0.95,
///     0.3,
///     vec!["reality_anchor".to_string()],
///     ContextSnapshot::new(),
/// )
/// .unwrap();
/// assert!(record.is_active());
///
/// let broken = ActivationRecord::new(EvaluatorId::Reality, 1.2, 0.3, vec![], ContextSnapshot::new());
/// assert!(broken.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivationRecord {
    evaluator_id: EvaluatorId,
    strength: f64,
    threshold: f64,
    fired_signals: Vec<String>,
    created_at: DateTime<Utc>,
    context_snapshot: ContextSnapshot,
}

impl ActivationRecord {
    /// Create a validated record timestamped now.
    ///
    /// Duplicate signal names are dropped, keeping first-seen order.
    pub fn new(
        evaluator_id: EvaluatorId,
        strength: f64,
        threshold: f64,
        fired_signals: Vec<String>,
        context_snapshot: ContextSnapshot,
    ) -> Result<Self, DomainError> {
        if !strength.is_finite() || !(0.0..=1.0).contains(&strength) {
            return Err(DomainError::StrengthOutOfRange {
                evaluator: evaluator_id,
                strength,
            });
        }

        let mut signals: Vec<String> = Vec::with_capacity(fired_signals.len());
        for signal in fired_signals {
            if !signals.contains(&signal) {
                signals.push(signal);
            }
        }

        let active = strength >= threshold;
        if active && signals.is_empty() {
            return Err(DomainError::MissingSignals {
                evaluator: evaluator_id,
                strength,
                threshold,
            });
        }
        if !active && !signals.is_empty() {
            return Err(DomainError::UnexpectedSignals {
                evaluator: evaluator_id,
                strength,
                threshold,
            });
        }

        Ok(Self {
            evaluator_id,
            strength,
            threshold,
            fired_signals: signals,
            created_at: Utc::now(),
            context_snapshot,
        })
    }

    pub fn evaluator_id(&self) -> EvaluatorId {
        self.evaluator_id
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    /// Threshold the evaluator applied when this record was produced
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn fired_signals(&self) -> &[String] {
        &self.fired_signals
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn context_snapshot(&self) -> &ContextSnapshot {
        &self.context_snapshot
    }

    /// Whether the evaluator met its threshold and deliberated
    pub fn is_active(&self) -> bool {
        self.strength >= self.threshold
    }
}

/// An evaluator's response text paired with its activation record.
///
/// Passive evaluators carry an empty response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Perspective {
    pub response: String,
    pub record: ActivationRecord,
}

impl Perspective {
    pub fn new(response: impl Into<String>, record: ActivationRecord) -> Self {
        Self {
            response: response.into(),
            record,
        }
    }

    pub fn evaluator_id(&self) -> EvaluatorId {
        self.record.evaluator_id()
    }
}
