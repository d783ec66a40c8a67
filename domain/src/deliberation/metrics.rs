//! Conflict, sparsity and confidence

use super::{Activations, is_active};
use crate::activation::EvaluatorId;
use serde::{Deserialize, Serialize};

/// Conflict above this gates the Equilibrium re-evaluation
pub const CONFLICT_THRESHOLD: f64 = 0.6;

/// Largest variance a set of values bounded to `[0, 1]` can reach.
///
/// Dividing by it puts the conflict score on a `[0, 1]` scale so the
/// re-evaluation gate is reachable.
pub const MAX_VARIANCE: f64 = 0.25;

/// Strength an evaluator must exceed to count as strongly active
pub const STRONG_ACTIVATION: f64 = 0.5;

/// Sample variance (n - 1 denominator); zero for fewer than two values.
pub fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)
}

/// Disagreement among perspective strengths, normalized to `[0, 1]`.
///
/// Identical strengths give exactly zero.
pub fn conflict_score(strengths: &[f64]) -> f64 {
    (sample_variance(strengths) / MAX_VARIANCE).min(1.0)
}

/// Fraction of the six perspective evaluators that stayed passive.
///
/// A perspective with no record counts as passive.
pub fn sparsity_ratio(activations: &Activations) -> f64 {
    let active = EvaluatorId::PERSPECTIVES
        .iter()
        .filter(|id| is_active(activations, **id))
        .count();
    1.0 - active as f64 / EvaluatorId::PERSPECTIVES.len() as f64
}

/// Sum of every recorded strength, Synthesis included
pub fn total_activation(activations: &Activations) -> f64 {
    activations.values().map(|record| record.strength()).sum()
}

/// Mean strength of the active perspective evaluators; zero if none is active
pub fn mean_active_strength(activations: &Activations) -> f64 {
    let active: Vec<f64> = EvaluatorId::PERSPECTIVES
        .iter()
        .filter_map(|id| activations.get(id))
        .filter(|record| record.is_active())
        .map(|record| record.strength())
        .collect();
    if active.is_empty() {
        0.0
    } else {
        active.iter().sum::<f64>() / active.len() as f64
    }
}

/// Weights of the two confidence inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceWeights {
    /// Weight of the mean active strength
    pub mean_weight: f64,
    /// Weight of `1 - conflict_score`
    pub coherence_weight: f64,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            mean_weight: 0.7,
            coherence_weight: 0.3,
        }
    }
}

/// `mean_weight * mean_active_strength + coherence_weight * (1 - conflict)`,
/// clamped to `[0, 1]`.
pub fn confidence(activations: &Activations, conflict: f64, weights: ConfidenceWeights) -> f64 {
    let value = weights.mean_weight * mean_active_strength(activations)
        + weights.coherence_weight * (1.0 - conflict);
    value.clamp(0.0, 1.0)
}
