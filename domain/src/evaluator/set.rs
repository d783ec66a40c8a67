//! The fixed evaluator set

use super::causality::CausalityEvaluator;
use super::equilibrium::EquilibriumEvaluator;
use super::memory::MemoryEvaluator;
use super::reality::RealityEvaluator;
use super::simulation::SimulationEvaluator;
use super::synthesis::SynthesisEvaluator;
use super::thresholds::EvaluatorThresholds;
use super::transformation::TransformationEvaluator;
use super::traits::Evaluator;
use crate::activation::EvaluatorId;

/// The seven evaluators, one field each.
///
/// The set is closed: there is no registration API, and lookups by
/// [`EvaluatorId`] are total.
#[derive(Debug, Clone)]
pub struct EvaluatorSet {
    reality: RealityEvaluator,
    causality: CausalityEvaluator,
    equilibrium: EquilibriumEvaluator,
    transformation: TransformationEvaluator,
    simulation: SimulationEvaluator,
    memory: MemoryEvaluator,
    synthesis: SynthesisEvaluator,
    thresholds: EvaluatorThresholds,
}

impl Default for EvaluatorSet {
    fn default() -> Self {
        Self::new(EvaluatorThresholds::default())
    }
}

impl EvaluatorSet {
    pub fn new(thresholds: EvaluatorThresholds) -> Self {
        Self {
            reality: RealityEvaluator::with_threshold(thresholds.get(EvaluatorId::Reality)),
            causality: CausalityEvaluator::with_threshold(thresholds.get(EvaluatorId::Causality)),
            equilibrium: EquilibriumEvaluator::with_threshold(
                thresholds.get(EvaluatorId::Equilibrium),
            ),
            transformation: TransformationEvaluator::with_threshold(
                thresholds.get(EvaluatorId::Transformation),
            ),
            simulation: SimulationEvaluator::with_threshold(
                thresholds.get(EvaluatorId::Simulation),
            ),
            memory: MemoryEvaluator::with_threshold(thresholds.get(EvaluatorId::Memory)),
            synthesis: SynthesisEvaluator::new(),
            thresholds,
        }
    }

    pub fn get(&self, id: EvaluatorId) -> &dyn Evaluator {
        match id {
            EvaluatorId::Reality => &self.reality,
            EvaluatorId::Causality => &self.causality,
            EvaluatorId::Equilibrium => &self.equilibrium,
            EvaluatorId::Transformation => &self.transformation,
            EvaluatorId::Simulation => &self.simulation,
            EvaluatorId::Memory => &self.memory,
            EvaluatorId::Synthesis => &self.synthesis,
        }
    }

    /// The six perspective evaluators in canonical order
    pub fn perspectives(&self) -> impl Iterator<Item = &dyn Evaluator> + '_ {
        EvaluatorId::PERSPECTIVES.into_iter().map(|id| self.get(id))
    }

    pub fn equilibrium(&self) -> &EquilibriumEvaluator {
        &self.equilibrium
    }

    pub fn synthesis(&self) -> &SynthesisEvaluator {
        &self.synthesis
    }

    pub fn thresholds(&self) -> &EvaluatorThresholds {
        &self.thresholds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::strategy::{arb_context, arb_signals};
    use crate::facts::{
        DeliberationContext, EquilibriumFacts, MemoryFacts, RealityFacts, SimulationFacts,
    };
    use proptest::prelude::*;

    #[test]
    fn test_lookup_is_consistent() {
        let set = EvaluatorSet::default();
        for id in EvaluatorId::ALL {
            assert_eq!(set.get(id).id(), id);
        }
        let order: Vec<EvaluatorId> = set.perspectives().map(|e| e.id()).collect();
        assert_eq!(order, EvaluatorId::PERSPECTIVES);
    }

    #[test]
    fn test_thresholds_are_applied() {
        let thresholds = EvaluatorThresholds::default()
            .with(EvaluatorId::Simulation, 0.8)
            .unwrap();
        let set = EvaluatorSet::new(thresholds);
        assert_eq!(set.get(EvaluatorId::Simulation).threshold(), 0.8);
        assert_eq!(set.get(EvaluatorId::Reality).threshold(), 0.3);
        assert_eq!(set.get(EvaluatorId::Synthesis).threshold(), 0.0);
    }

    #[test]
    fn test_fallbacks_stay_below_default_threshold() {
        let set = EvaluatorSet::default();
        for evaluator in set.perspectives() {
            let perspective = evaluator
                .activate("", &DeliberationContext::default())
                .unwrap();
            assert!(
                !perspective.record.is_active(),
                "{} activated on an empty query",
                evaluator.id()
            );
        }
    }

    fn enriched() -> DeliberationContext {
        DeliberationContext::new()
            .with_reality(RealityFacts {
                skills: [("go".to_string(), f64::NAN)].into(),
                requirements: [("go".to_string(), 9.0)].into(),
                ..Default::default()
            })
            .with_simulation(SimulationFacts {
                outcomes: [("win".to_string(), 0)].into(),
            })
            .with_memory(MemoryFacts::default())
    }

    #[test]
    fn test_counts_near_u32_max_are_handled() {
        let context = DeliberationContext::new()
            .with_simulation(SimulationFacts {
                outcomes: [
                    ("offer".to_string(), 4_000_000_000),
                    ("rejected".to_string(), 1_000_000_000),
                ]
                .into(),
            })
            .with_equilibrium(EquilibriumFacts {
                preferences: [("remote".to_string(), u32::MAX), ("onsite".to_string(), u32::MAX)]
                    .into(),
                ..Default::default()
            });
        let set = EvaluatorSet::default();
        let query = "Should we hire? How do we balance the team?";

        let simulation = set.get(EvaluatorId::Simulation).activate(query, &context).unwrap();
        assert!(simulation.record.is_active());
        assert_eq!(
            simulation.record.context_snapshot()["total_outcomes"],
            serde_json::json!(5_000_000_000u64)
        );

        let equilibrium = set.get(EvaluatorId::Equilibrium).activate(query, &context).unwrap();
        assert!(equilibrium.record.is_active());
        assert!(equilibrium.response.contains(&format!("of {}", 2 * u64::from(u32::MAX))));
    }

    proptest! {
        #[test]
        fn prop_activation_is_total_for_any_context(
            query in ".{0,120}",
            mut context in arb_context(),
            signals in arb_signals(),
        ) {
            context.signals = signals;
            let set = EvaluatorSet::default();
            for id in EvaluatorId::ALL {
                let perspective = set.get(id).activate(&query, &context).unwrap();
                let strength = perspective.record.strength();
                prop_assert!((0.0..=1.0).contains(&strength));
                prop_assert_eq!(
                    perspective.record.is_active(),
                    !perspective.record.fired_signals().is_empty()
                );
                prop_assert_eq!(perspective.record.is_active(), !perspective.response.is_empty());
            }
        }

        #[test]
        fn prop_activation_is_total(query in ".{0,200}") {
            let set = EvaluatorSet::default();
            for context in [DeliberationContext::default(), enriched()] {
                for id in EvaluatorId::ALL {
                    let perspective = set.get(id).activate(&query, &context).unwrap();
                    let strength = perspective.record.strength();
                    prop_assert!((0.0..=1.0).contains(&strength));
                    prop_assert_eq!(
                        perspective.record.is_active(),
                        !perspective.record.fired_signals().is_empty()
                    );
                }
            }
        }

        #[test]
        fn prop_activation_is_deterministic(query in "[a-z ]{0,60}") {
            let set = EvaluatorSet::default();
            let context = DeliberationContext::default();
            for evaluator in set.perspectives() {
                let first = evaluator.activate(&query, &context).unwrap();
                let second = evaluator.activate(&query, &context).unwrap();
                prop_assert_eq!(first.response, second.response);
                prop_assert_eq!(first.record.strength(), second.record.strength());
                prop_assert_eq!(first.record.fired_signals(), second.record.fired_signals());
            }
        }
    }
}
