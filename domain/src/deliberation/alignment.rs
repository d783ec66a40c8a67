//! Ordering-rule alignment

use super::metrics::CONFLICT_THRESHOLD;
use super::{Activations, is_active};
use crate::activation::EvaluatorId;
use serde::{Deserialize, Serialize};

/// The four ordering rules a deliberation is scored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentRule {
    /// Synthesis is invoked last. Always applicable.
    SynthesisLast,
    /// When Reality and Simulation are both active, Reality is invoked first.
    RealityBeforeSimulation,
    /// Under high conflict, Equilibrium ends up active.
    EquilibriumUnderConflict,
    /// An active Transformation is backed by an active Memory (half credit
    /// otherwise).
    TransformationWithMemory,
}

/// Credit of every applicable rule, in rule order.
pub fn alignment_checks(
    order: &[EvaluatorId],
    activations: &Activations,
    conflict: f64,
) -> Vec<(AlignmentRule, f64)> {
    let credit = |satisfied: bool| if satisfied { 1.0 } else { 0.0 };
    let mut checks = vec![(
        AlignmentRule::SynthesisLast,
        credit(order.last() == Some(&EvaluatorId::Synthesis)),
    )];

    if is_active(activations, EvaluatorId::Reality) && is_active(activations, EvaluatorId::Simulation)
    {
        let position = |id: EvaluatorId| order.iter().position(|entry| *entry == id);
        let satisfied = matches!(
            (position(EvaluatorId::Reality), position(EvaluatorId::Simulation)),
            (Some(reality), Some(simulation)) if reality < simulation
        );
        checks.push((AlignmentRule::RealityBeforeSimulation, credit(satisfied)));
    }

    if conflict > CONFLICT_THRESHOLD {
        checks.push((
            AlignmentRule::EquilibriumUnderConflict,
            credit(is_active(activations, EvaluatorId::Equilibrium)),
        ));
    }

    if is_active(activations, EvaluatorId::Transformation) {
        let backed = is_active(activations, EvaluatorId::Memory);
        checks.push((
            AlignmentRule::TransformationWithMemory,
            if backed { 1.0 } else { 0.5 },
        ));
    }

    checks
}

/// Satisfied credit over applicable rules; 1.0 when no rule applies.
pub fn alignment_score(order: &[EvaluatorId], activations: &Activations, conflict: f64) -> f64 {
    let checks = alignment_checks(order, activations, conflict);
    if checks.is_empty() {
        return 1.0;
    }
    checks.iter().map(|(_, credit)| credit).sum::<f64>() / checks.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deliberation::metrics::tests::activations;
    use EvaluatorId::*;

    const CANONICAL: [EvaluatorId; 7] = EvaluatorId::ALL;

    #[test]
    fn test_only_synthesis_rule_applies() {
        let acts = activations(&[(Reality, 0.2), (Synthesis, 1.0)]);
        let checks = alignment_checks(&CANONICAL, &acts, 0.0);
        assert_eq!(checks, vec![(AlignmentRule::SynthesisLast, 1.0)]);
        assert_eq!(alignment_score(&CANONICAL, &acts, 0.0), 1.0);
    }

    #[test]
    fn test_synthesis_not_last() {
        let order = [Reality, Synthesis, Memory];
        let acts = activations(&[(Synthesis, 1.0)]);
        assert_eq!(alignment_score(&order, &acts, 0.0), 0.0);
    }

    #[test]
    fn test_simulation_before_reality_is_detected() {
        let acts = activations(&[(Reality, 0.9), (Simulation, 0.9), (Synthesis, 1.0)]);
        let forced = [Simulation, Reality, Synthesis];
        assert_eq!(alignment_score(&forced, &acts, 0.0), 0.5);
        assert_eq!(alignment_score(&CANONICAL, &acts, 0.0), 1.0);
    }

    #[test]
    fn test_conflict_requires_active_equilibrium() {
        let passive = activations(&[(Equilibrium, 0.1), (Synthesis, 1.0)]);
        let active = activations(&[(Equilibrium, 0.95), (Synthesis, 1.0)]);

        assert_eq!(alignment_score(&CANONICAL, &passive, 0.8), 0.5);
        assert_eq!(alignment_score(&CANONICAL, &active, 0.8), 1.0);
        assert_eq!(alignment_score(&CANONICAL, &passive, 0.6), 1.0);
    }

    #[test]
    fn test_transformation_without_memory_gets_half_credit() {
        let alone = activations(&[(Transformation, 0.9), (Synthesis, 1.0)]);
        let backed = activations(&[(Transformation, 0.9), (Memory, 0.8), (Synthesis, 1.0)]);

        assert_eq!(alignment_score(&CANONICAL, &alone, 0.0), 0.75);
        assert_eq!(alignment_score(&CANONICAL, &backed, 0.0), 1.0);
    }

    #[test]
    fn test_empty_order_still_scored() {
        let acts = activations(&[]);
        assert_eq!(alignment_score(&[], &acts, 0.0), 0.0);
    }
}
