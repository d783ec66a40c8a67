//! Deliberation context
//!
//! The read-only facts handed to every evaluator. Callers fill the optional
//! per-perspective namespaces (usually from an enrichment store); the
//! orchestrator adds its own [`DeliberationSignals`] on a private copy.
//! Every namespace may be absent and evaluators degrade to generic reasoning.
//!
//! ```text
//! DeliberationContext
//!  ├─ reality         skills / requirements (0–5), resources, timeline, scope
//!  ├─ causality       milestones, pacing
//!  ├─ equilibrium     preferences, remote ratio, competing options
//!  ├─ transformation  learning deltas, session count
//!  ├─ simulation      historical outcome distribution
//!  ├─ memory          outcome tallies by category, topic ratings
//!  └─ signals         (orchestrator only) conflict flag, recent decisions
//! ```

mod namespaces;
#[cfg(any(test, feature = "proptest"))]
pub mod strategy;

pub use namespaces::{
    CausalityFacts, EquilibriumFacts, MemoryFacts, Milestone, OutcomeTally, RealityFacts,
    SimulationFacts, SkillGap, TransformationFacts,
};

use crate::activation::EvaluatorId;
use serde::{Deserialize, Serialize};

/// Skill gap (in rating points) at or above which Reality treats the gap as large
pub const LARGE_SKILL_GAP: f64 = 1.5;

/// Facts available to evaluators for one deliberation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliberationContext {
    pub reality: Option<RealityFacts>,
    pub causality: Option<CausalityFacts>,
    pub equilibrium: Option<EquilibriumFacts>,
    pub transformation: Option<TransformationFacts>,
    pub simulation: Option<SimulationFacts>,
    pub memory: Option<MemoryFacts>,
    /// Orchestrator-owned signals; never read from callers
    #[serde(skip)]
    pub signals: DeliberationSignals,
}

impl DeliberationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reality(mut self, facts: RealityFacts) -> Self {
        self.reality = Some(facts);
        self
    }

    pub fn with_causality(mut self, facts: CausalityFacts) -> Self {
        self.causality = Some(facts);
        self
    }

    pub fn with_equilibrium(mut self, facts: EquilibriumFacts) -> Self {
        self.equilibrium = Some(facts);
        self
    }

    pub fn with_transformation(mut self, facts: TransformationFacts) -> Self {
        self.transformation = Some(facts);
        self
    }

    pub fn with_simulation(mut self, facts: SimulationFacts) -> Self {
        self.simulation = Some(facts);
        self
    }

    pub fn with_memory(mut self, facts: MemoryFacts) -> Self {
        self.memory = Some(facts);
        self
    }

    /// Whether the caller supplied any enrichment namespace
    pub fn has_enrichment(&self) -> bool {
        self.enriched_namespaces().next().is_some()
    }

    /// Perspectives for which the caller supplied a namespace, in canonical order
    pub fn enriched_namespaces(&self) -> impl Iterator<Item = EvaluatorId> + '_ {
        let present = [
            self.reality.is_some(),
            self.causality.is_some(),
            self.equilibrium.is_some(),
            self.transformation.is_some(),
            self.simulation.is_some(),
            self.memory.is_some(),
        ];
        EvaluatorId::PERSPECTIVES
            .into_iter()
            .zip(present)
            .filter_map(|(id, present)| present.then_some(id))
    }
}

/// Signals the orchestrator attaches to its private copy of the context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeliberationSignals {
    /// Set on the Equilibrium re-evaluation pass
    pub conflict_detected: bool,
    /// Conflict score measured over the first pass
    pub conflict_score: f64,
    /// Digests of the most recent prior deliberations, oldest first
    pub recent_decisions: Vec<DecisionDigest>,
}

/// Compact summary of a past deliberation used for memory enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionDigest {
    pub sequence_number: u64,
    pub query: String,
    pub confidence: f64,
    pub active: Vec<EvaluatorId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_enrichment() {
        let context = DeliberationContext::default();
        assert!(!context.has_enrichment());
        assert!(!context.signals.conflict_detected);
        assert!(context.signals.recent_decisions.is_empty());
    }

    #[test]
    fn test_enriched_namespaces_in_canonical_order() {
        let context = DeliberationContext::new()
            .with_memory(MemoryFacts::default())
            .with_reality(RealityFacts::default());

        let present: Vec<_> = context.enriched_namespaces().collect();
        assert_eq!(present, vec![EvaluatorId::Reality, EvaluatorId::Memory]);
    }

    #[test]
    fn test_deserialize_partial_json() {
        let json = r#"{
            "reality": { "skills": { "sql": 2.9 }, "requirements": { "sql": 4.5 } },
            "simulation": { "outcomes": { "offer": 2, "rejected": 5 } }
        }"#;
        let context: DeliberationContext = serde_json::from_str(json).unwrap();

        let reality = context.reality.as_ref().unwrap();
        assert_eq!(reality.skills.get("sql"), Some(&2.9));
        assert!(context.causality.is_none());
        assert_eq!(context.simulation.unwrap().total_outcomes(), 7);
    }

    #[test]
    fn test_signals_never_deserialized() {
        let json = r#"{ "signals": { "conflict_detected": true } }"#;
        let context: DeliberationContext = serde_json::from_str(json).unwrap();
        assert!(!context.signals.conflict_detected);
    }
}
