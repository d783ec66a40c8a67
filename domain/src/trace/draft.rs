//! In-progress decision trace

use super::entities::{DecisionTrace, LineageEntry};
use crate::activation::{ActivationRecord, EvaluatorId, Perspective};
use crate::core::error::DomainError;
use crate::deliberation::{
    Activations, ConfidenceWeights, alignment_score, confidence, detect_patterns,
    extract_lineage, is_active, sparsity_ratio, total_activation,
};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use ulid::Ulid;

/// A decision trace under construction.
///
/// Owned by a single `deliberate` call. Recording a perspective twice
/// replaces the earlier record and response but keeps both entries in the
/// invocation order.
#[derive(Debug, Clone)]
pub struct TraceDraft {
    trace_id: String,
    sequence_number: u64,
    query: String,
    started_at: DateTime<Utc>,
    activations: Activations,
    responses: BTreeMap<EvaluatorId, String>,
    activation_order: Vec<EvaluatorId>,
    conflict_score: f64,
}

impl TraceDraft {
    /// Start a draft with a fresh trace id
    pub fn new(sequence_number: u64, query: impl Into<String>) -> Self {
        Self {
            trace_id: Ulid::new().to_string(),
            sequence_number,
            query: query.into(),
            started_at: Utc::now(),
            activations: BTreeMap::new(),
            responses: BTreeMap::new(),
            activation_order: Vec::new(),
            conflict_score: 0.0,
        }
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn activations(&self) -> &Activations {
        &self.activations
    }

    pub fn activation(&self, id: EvaluatorId) -> Option<&ActivationRecord> {
        self.activations.get(&id)
    }

    pub fn responses(&self) -> &BTreeMap<EvaluatorId, String> {
        &self.responses
    }

    pub fn activation_order(&self) -> &[EvaluatorId] {
        &self.activation_order
    }

    pub fn is_active(&self, id: EvaluatorId) -> bool {
        is_active(&self.activations, id)
    }

    /// First-pass conflict score, zero until measured
    pub fn conflict_score(&self) -> f64 {
        self.conflict_score
    }

    pub fn set_conflict_score(&mut self, score: f64) {
        self.conflict_score = score;
    }

    /// Strengths of the recorded perspective evaluators in canonical order
    pub fn perspective_strengths(&self) -> Vec<f64> {
        EvaluatorId::PERSPECTIVES
            .iter()
            .filter_map(|id| self.activations.get(id))
            .map(ActivationRecord::strength)
            .collect()
    }

    pub fn equilibrium_reevaluated(&self) -> bool {
        self.activation_order
            .iter()
            .filter(|id| **id == EvaluatorId::Equilibrium)
            .count()
            > 1
    }

    /// Store one evaluator's output and append it to the invocation order
    pub fn record(&mut self, perspective: Perspective) {
        let id = perspective.evaluator_id();
        self.activation_order.push(id);
        self.responses.insert(id, perspective.response);
        self.activations.insert(id, perspective.record);
    }

    /// Compute the derived metrics and freeze the trace.
    ///
    /// The decision text is the Synthesis response. Fails if an evaluator is
    /// missing, Synthesis was not invoked last, or its text is empty.
    pub fn freeze(self, weights: ConfidenceWeights) -> Result<DecisionTrace, DomainError> {
        let missing: Vec<EvaluatorId> = EvaluatorId::ALL
            .into_iter()
            .filter(|id| !self.activations.contains_key(id))
            .collect();
        if !missing.is_empty() {
            return Err(DomainError::IncompleteTrace { missing });
        }
        if self.activation_order.last() != Some(&EvaluatorId::Synthesis) {
            return Err(DomainError::SynthesisNotLast);
        }

        let decision_text = self
            .responses
            .get(&EvaluatorId::Synthesis)
            .filter(|text| !text.trim().is_empty())
            .cloned()
            .ok_or(DomainError::EmptySynthesis)?;

        let conflict = self.conflict_score;
        let sparsity = sparsity_ratio(&self.activations);
        let total = total_activation(&self.activations);
        let confidence = confidence(&self.activations, conflict, weights);
        let alignment = alignment_score(&self.activation_order, &self.activations, conflict);
        let pattern_flags = detect_patterns(&self.activations, sparsity, total, conflict);
        let lineage: Vec<LineageEntry> = extract_lineage(&self.activation_order, &self.activations);

        Ok(DecisionTrace {
            trace_id: self.trace_id,
            sequence_number: self.sequence_number,
            query: self.query,
            started_at: self.started_at,
            completed_at: Utc::now(),
            activations: self.activations,
            responses: self.responses,
            activation_order: self.activation_order,
            sparsity_ratio: sparsity,
            total_activation: total,
            decision_text,
            confidence,
            alignment_score: alignment,
            pattern_flags,
            lineage,
        })
    }
}
