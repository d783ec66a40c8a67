//! Anomaly flags over a finished deliberation

use super::metrics::CONFLICT_THRESHOLD;
use super::{Activations, is_active};
use crate::activation::EvaluatorId;
use crate::trace::PatternFlag;
use std::collections::BTreeSet;

/// Below this sparsity too many perspectives engaged
pub const LOW_SPARSITY: f64 = 0.3;

/// Above this sparsity almost nothing engaged
pub const HIGH_SPARSITY: f64 = 0.8;

/// Total activation (all seven evaluators) above this is overactivation
pub const OVERACTIVATION: f64 = 5.0;

/// Evaluate every flag independently.
pub fn detect_patterns(
    activations: &Activations,
    sparsity: f64,
    total_activation: f64,
    conflict: f64,
) -> BTreeSet<PatternFlag> {
    let active = |id| is_active(activations, id);
    let mut flags = BTreeSet::new();

    if sparsity < LOW_SPARSITY {
        flags.insert(PatternFlag::LowSparsity);
    }
    if sparsity > HIGH_SPARSITY {
        flags.insert(PatternFlag::HighSparsity);
    }
    if active(EvaluatorId::Simulation) && !active(EvaluatorId::Reality) {
        flags.insert(PatternFlag::UngroundedSimulation);
    }
    if active(EvaluatorId::Transformation) && !active(EvaluatorId::Memory) {
        flags.insert(PatternFlag::AhistoricalTransformation);
    }
    if conflict > CONFLICT_THRESHOLD && !active(EvaluatorId::Equilibrium) {
        flags.insert(PatternFlag::UnresolvedConflict);
    }
    if total_activation > OVERACTIVATION {
        flags.insert(PatternFlag::Overactivation);
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deliberation::metrics::tests::activations;
    use EvaluatorId::*;

    #[test]
    fn test_quiet_deliberation() {
        let acts = activations(&[(Synthesis, 1.0)]);
        let flags = detect_patterns(&acts, 1.0, 1.0, 0.0);
        assert_eq!(flags, BTreeSet::from([PatternFlag::HighSparsity]));
    }

    #[test]
    fn test_ungrounded_and_ahistorical() {
        let acts = activations(&[(Simulation, 0.9), (Transformation, 0.9), (Synthesis, 1.0)]);
        let flags = detect_patterns(&acts, 4.0 / 6.0, 2.8, 0.0);
        assert_eq!(
            flags,
            BTreeSet::from([
                PatternFlag::UngroundedSimulation,
                PatternFlag::AhistoricalTransformation
            ])
        );
    }

    #[test]
    fn test_unresolved_conflict_and_overactivation() {
        let acts = activations(&[(Equilibrium, 0.2), (Synthesis, 1.0)]);
        let flags = detect_patterns(&acts, 0.0, 5.5, 0.9);
        assert!(flags.contains(&PatternFlag::UnresolvedConflict));
        assert!(flags.contains(&PatternFlag::Overactivation));
        assert!(flags.contains(&PatternFlag::LowSparsity));
    }

    #[test]
    fn test_boundaries_are_exclusive() {
        let acts = activations(&[(Synthesis, 1.0)]);
        let flags = detect_patterns(&acts, 0.3, 5.0, 0.6);
        assert!(flags.is_empty());
    }
}
