//! Frozen decision trace

use super::flag::PatternFlag;
use crate::activation::{ActivationRecord, EvaluatorId};
use crate::deliberation::Activations;
use crate::facts::DecisionDigest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One `(evaluator, signal)` step in a trace's lineage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageEntry {
    pub evaluator: EvaluatorId,
    pub signal: String,
}

impl LineageEntry {
    pub fn new(evaluator: EvaluatorId, signal: impl Into<String>) -> Self {
        Self {
            evaluator,
            signal: signal.into(),
        }
    }
}

/// The complete, immutable record of one deliberation (Entity)
///
/// Built only by [`TraceDraft::freeze`](super::TraceDraft::freeze), which
/// guarantees:
/// - all seven evaluators have exactly one activation record
/// - Synthesis is the last entry of `activation_order`
/// - `decision_text` is non-empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTrace {
    pub(super) trace_id: String,
    pub(super) sequence_number: u64,
    pub(super) query: String,
    pub(super) started_at: DateTime<Utc>,
    pub(super) completed_at: DateTime<Utc>,
    pub(super) activations: Activations,
    pub(super) responses: BTreeMap<EvaluatorId, String>,
    pub(super) activation_order: Vec<EvaluatorId>,
    pub(super) sparsity_ratio: f64,
    pub(super) total_activation: f64,
    pub(super) decision_text: String,
    pub(super) confidence: f64,
    pub(super) alignment_score: f64,
    pub(super) pattern_flags: BTreeSet<PatternFlag>,
    pub(super) lineage: Vec<LineageEntry>,
}

impl DecisionTrace {
    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    /// Position of this deliberation in its orchestrator's lifetime
    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    pub fn activations(&self) -> &Activations {
        &self.activations
    }

    pub fn activation(&self, id: EvaluatorId) -> Option<&ActivationRecord> {
        self.activations.get(&id)
    }

    /// Response text per evaluator; empty for passive evaluators
    pub fn responses(&self) -> &BTreeMap<EvaluatorId, String> {
        &self.responses
    }

    pub fn response(&self, id: EvaluatorId) -> &str {
        self.responses.get(&id).map(String::as_str).unwrap_or("")
    }

    /// Evaluators in invocation order; Equilibrium may appear twice
    pub fn activation_order(&self) -> &[EvaluatorId] {
        &self.activation_order
    }

    pub fn sparsity_ratio(&self) -> f64 {
        self.sparsity_ratio
    }

    pub fn total_activation(&self) -> f64 {
        self.total_activation
    }

    pub fn decision_text(&self) -> &str {
        &self.decision_text
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn alignment_score(&self) -> f64 {
        self.alignment_score
    }

    pub fn pattern_flags(&self) -> &BTreeSet<PatternFlag> {
        &self.pattern_flags
    }

    pub fn has_flag(&self, flag: PatternFlag) -> bool {
        self.pattern_flags.contains(&flag)
    }

    pub fn lineage(&self) -> &[LineageEntry] {
        &self.lineage
    }

    /// Active perspective evaluators in canonical order (Synthesis excluded)
    pub fn active_perspectives(&self) -> Vec<EvaluatorId> {
        EvaluatorId::PERSPECTIVES
            .into_iter()
            .filter(|id| self.activation(*id).is_some_and(ActivationRecord::is_active))
            .collect()
    }

    /// Whether Equilibrium was invoked a second time
    pub fn equilibrium_reevaluated(&self) -> bool {
        self.activation_order
            .iter()
            .filter(|id| **id == EvaluatorId::Equilibrium)
            .count()
            > 1
    }

    /// Compact summary handed to later deliberations
    pub fn digest(&self) -> DecisionDigest {
        DecisionDigest {
            sequence_number: self.sequence_number,
            query: self.query.clone(),
            confidence: self.confidence,
            active: self.active_perspectives(),
        }
    }
}
