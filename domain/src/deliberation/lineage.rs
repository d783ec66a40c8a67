//! Audit lineage of strongly active evaluators

use super::Activations;
use super::metrics::STRONG_ACTIVATION;
use crate::activation::EvaluatorId;
use crate::trace::LineageEntry;

/// `(evaluator, signal)` pairs in invocation order.
///
/// Walks `order` including repeated entries, so an evaluator invoked twice
/// contributes its final signals twice. Only evaluators whose final strength
/// exceeds 0.5 contribute.
pub fn extract_lineage(order: &[EvaluatorId], activations: &Activations) -> Vec<LineageEntry> {
    order
        .iter()
        .filter_map(|id| activations.get(id).map(|record| (*id, record)))
        .filter(|(_, record)| record.strength() > STRONG_ACTIVATION)
        .flat_map(|(id, record)| {
            record
                .fired_signals()
                .iter()
                .map(move |signal| LineageEntry::new(id, signal.clone()))
        })
        .collect()
}
