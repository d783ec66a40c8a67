//! Deliberate use case
//!
//! [`Parliament`] owns the evaluator set, the decision history and the
//! sequence counter, and runs the deliberation algorithm:
//!
//! ```text
//! 1. sequence_number += 1, new draft with a fresh trace id
//! 2. six perspectives in canonical order
//! 3. conflict > 0.6  ──▶ Equilibrium again with conflict_detected
//! 4. Synthesis (always last)
//! 5. freeze: confidence, alignment, pattern flags, lineage
//! 6. append to history, log, return
//! ```
//!
//! Deliberation is synchronous and takes `&mut self`, so concurrent callers
//! must serialize access or use one `Parliament` each.

use super::statistics::{EvaluatorStatistics, evaluator_statistics};
use crate::config::DeliberationParams;
use crate::ports::decision_logger::{DecisionLogger, NoDecisionLogger};
use crate::ports::observer::{DeliberationObserver, NoObserver};
use crate::ports::trace_log::{InMemoryTraceLog, TraceLog};
use parliament_domain::{
    CONFLICT_THRESHOLD, DecisionTrace, DeliberationContext, DeliberationSignals, DomainError,
    Evaluator, EvaluatorSet, Perspective, TraceDraft, conflict_score, sparsity_ratio, total_activation,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during a deliberation.
///
/// Only reachable when an evaluator breaks its contract.
#[derive(Error, Debug)]
pub enum DeliberationError {
    #[error("Evaluator contract violated: {0}")]
    ContractViolation(#[from] DomainError),
}

/// The orchestrator.
pub struct Parliament {
    evaluators: EvaluatorSet,
    history: Box<dyn TraceLog>,
    logger: Arc<dyn DecisionLogger>,
    params: DeliberationParams,
    sequence_number: u64,
}

impl Default for Parliament {
    fn default() -> Self {
        Self::new(DeliberationParams::default())
    }
}

impl Parliament {
    /// Create an orchestrator with in-memory history and no decision log
    pub fn new(mut params: DeliberationParams) -> Self {
        params.retention = params.retention.normalized();
        Self {
            evaluators: EvaluatorSet::new(params.thresholds.clone()),
            history: Box::new(InMemoryTraceLog::new(params.retention)),
            logger: Arc::new(NoDecisionLogger),
            params,
            sequence_number: 0,
        }
    }

    /// Replace the history store
    pub fn with_trace_log(mut self, history: Box<dyn TraceLog>) -> Self {
        self.history = history;
        self
    }

    /// Persist every frozen trace through `logger`
    pub fn with_decision_logger(mut self, logger: Arc<dyn DecisionLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn evaluators(&self) -> &EvaluatorSet {
        &self.evaluators
    }

    pub fn params(&self) -> &DeliberationParams {
        &self.params
    }

    /// Sequence number of the most recent deliberation (0 before the first)
    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    /// Up to `limit` retained traces, most recent first
    pub fn history(&self, limit: usize) -> Vec<Arc<DecisionTrace>> {
        self.history.recent(limit)
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Per-evaluator statistics over the retained history
    pub fn evaluator_statistics(&self) -> Vec<EvaluatorStatistics> {
        evaluator_statistics(&self.history.all())
    }

    /// Deliberate without progress callbacks
    pub fn deliberate(
        &mut self,
        query: &str,
        context: &DeliberationContext,
    ) -> Result<(String, Arc<DecisionTrace>), DeliberationError> {
        self.deliberate_with_progress(query, context, &NoObserver)
    }

    /// Deliberate, reporting each step to `observer`.
    ///
    /// `context` is never modified; orchestrator signals go on a private copy.
    pub fn deliberate_with_progress(
        &mut self,
        query: &str,
        context: &DeliberationContext,
        observer: &dyn DeliberationObserver,
    ) -> Result<(String, Arc<DecisionTrace>), DeliberationError> {
        self.sequence_number += 1;
        let mut draft = TraceDraft::new(self.sequence_number, query);
        info!(
            sequence = self.sequence_number,
            trace_id = draft.trace_id(),
            "Starting deliberation"
        );
        observer.on_deliberation_start(self.sequence_number, query);

        let working = self.working_context(context);

        // First pass
        for evaluator in self.evaluators.perspectives() {
            let perspective = evaluator.activate(query, &working)?;
            Self::record(&mut draft, perspective, observer);
        }

        // Conditional second pass
        let conflict = conflict_score(&draft.perspective_strengths());
        draft.set_conflict_score(conflict);
        if conflict > CONFLICT_THRESHOLD {
            info!(conflict, "Conflict above threshold, re-evaluating equilibrium");
            observer.on_equilibrium_reevaluation(conflict);

            let mut mediation = working.clone();
            mediation.signals.conflict_detected = true;
            mediation.signals.conflict_score = conflict;
            let perspective = self.evaluators.equilibrium().activate(query, &mediation)?;
            if !perspective.record.is_active() {
                warn!(
                    strength = perspective.record.strength(),
                    "Equilibrium stayed passive after re-evaluation"
                );
            }
            Self::record(&mut draft, perspective, observer);
        } else {
            debug!(conflict, "Conflict below threshold");
        }

        debug!(
            sparsity = sparsity_ratio(draft.activations()),
            total_activation = total_activation(draft.activations()),
            "Perspectives complete"
        );

        let synthesis = self
            .evaluators
            .synthesis()
            .synthesize(draft.responses(), &draft)?;
        Self::record(&mut draft, synthesis, observer);

        let trace = Arc::new(draft.freeze(self.params.confidence_weights)?);
        info!(
            sequence = trace.sequence_number(),
            confidence = trace.confidence(),
            alignment = trace.alignment_score(),
            sparsity = trace.sparsity_ratio(),
            flags = ?trace.pattern_flags(),
            "Deliberation complete"
        );

        self.history.append(Arc::clone(&trace));
        self.logger.log(&trace);
        observer.on_deliberation_complete(&trace);

        Ok((trace.decision_text().to_string(), trace))
    }

    /// Clone the caller's context and attach orchestrator-owned signals
    fn working_context(&self, context: &DeliberationContext) -> DeliberationContext {
        let mut working = context.clone();
        let mut recent: Vec<_> = self
            .history
            .recent(self.params.recent_history_window)
            .iter()
            .map(|trace| trace.digest())
            .collect();
        recent.reverse();
        working.signals = DeliberationSignals {
            recent_decisions: recent,
            ..DeliberationSignals::default()
        };
        working
    }

    fn record(draft: &mut TraceDraft, perspective: Perspective, observer: &dyn DeliberationObserver) {
        debug!(
            evaluator = %perspective.evaluator_id(),
            strength = perspective.record.strength(),
            active = perspective.record.is_active(),
            signals = ?perspective.record.fired_signals(),
            "Evaluator complete"
        );
        observer.on_evaluator_complete(&perspective.record);
        draft.record(perspective);
    }
}
