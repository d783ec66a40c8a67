//! Per-evaluator statistics over the decision history

use parliament_domain::{DecisionTrace, EvaluatorId};
use serde::Serialize;
use std::sync::Arc;

/// How one evaluator behaved across the retained history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluatorStatistics {
    pub evaluator: EvaluatorId,
    /// Traces this evaluator has a record in
    pub observations: usize,
    pub active_count: usize,
    pub mean_strength: f64,
    /// `active_count / observations`, zero with no observations
    pub activation_rate: f64,
}

/// Statistics for all seven evaluators in canonical order.
pub fn evaluator_statistics(traces: &[Arc<DecisionTrace>]) -> Vec<EvaluatorStatistics> {
    EvaluatorId::ALL
        .into_iter()
        .map(|id| {
            let records: Vec<_> = traces.iter().filter_map(|t| t.activation(id)).collect();
            let observations = records.len();
            let active_count = records.iter().filter(|r| r.is_active()).count();
            let (mean_strength, activation_rate) = if observations == 0 {
                (0.0, 0.0)
            } else {
                let n = observations as f64;
                (
                    records.iter().map(|r| r.strength()).sum::<f64>() / n,
                    active_count as f64 / n,
                )
            };
            EvaluatorStatistics {
                evaluator: id,
                observations,
                active_count,
                mean_strength,
                activation_rate,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history() {
        let stats = evaluator_statistics(&[]);
        assert_eq!(stats.len(), 7);
        assert!(stats.iter().all(|s| s.observations == 0 && s.activation_rate == 0.0));
    }
}
