//! `proptest` strategies for arbitrary deliberation contexts
//!
//! Generates the hostile shapes callers may legally hand in: counts up to
//! `u32::MAX`, NaN and infinite ratings, empty or non-ASCII topic names and
//! large maps. Compiled for this crate's tests and for dependents that enable
//! the `proptest` feature.

use super::{
    CausalityFacts, DecisionDigest, DeliberationContext, DeliberationSignals, EquilibriumFacts,
    MemoryFacts, Milestone, OutcomeTally, RealityFacts, SimulationFacts, TransformationFacts,
};
use crate::activation::EvaluatorId;
use proptest::collection::{btree_map, vec};
use proptest::option;
use proptest::prelude::*;
use proptest::sample::subsequence;
use std::collections::BTreeMap;

const MAX_ENTRIES: usize = 48;

fn rating() -> impl Strategy<Value = f64> {
    prop_oneof![
        4 => 0.0..=5.0f64,
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
        1 => any::<f64>(),
    ]
}

fn count() -> impl Strategy<Value = u32> {
    prop_oneof![
        3 => 0u32..20,
        1 => Just(u32::MAX),
        1 => any::<u32>(),
    ]
}

fn label() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z]{1,10}",
        ".{0,16}",
    ]
}

fn ratings() -> impl Strategy<Value = BTreeMap<String, f64>> {
    btree_map(label(), rating(), 0..MAX_ENTRIES)
}

fn counts() -> impl Strategy<Value = BTreeMap<String, u32>> {
    btree_map(label(), count(), 0..MAX_ENTRIES)
}

fn reality() -> impl Strategy<Value = RealityFacts> {
    (
        ratings(),
        ratings(),
        option::of(label()),
        option::of(label()),
        option::of(label()),
        vec(label(), 0..8),
    )
        .prop_map(
            |(skills, requirements, resources, timeline, scope, stakeholders)| RealityFacts {
                skills,
                requirements,
                resources,
                timeline,
                scope,
                stakeholders,
            },
        )
}

fn causality() -> impl Strategy<Value = CausalityFacts> {
    (
        vec(
            (label(), label()).prop_map(|(label, status)| Milestone { label, status }),
            0..MAX_ENTRIES,
        ),
        option::of(rating()),
    )
        .prop_map(|(milestones, avg_days_between_steps)| CausalityFacts {
            milestones,
            avg_days_between_steps,
        })
}

fn equilibrium() -> impl Strategy<Value = EquilibriumFacts> {
    (counts(), option::of(rating()), vec(label(), 0..8)).prop_map(
        |(preferences, remote_ratio, options)| EquilibriumFacts {
            preferences,
            remote_ratio,
            options,
        },
    )
}

fn transformation() -> impl Strategy<Value = TransformationFacts> {
    (ratings(), count()).prop_map(|(deltas, total_sessions)| TransformationFacts {
        deltas,
        total_sessions,
    })
}

fn simulation() -> impl Strategy<Value = SimulationFacts> {
    counts().prop_map(|outcomes| SimulationFacts { outcomes })
}

fn memory() -> impl Strategy<Value = MemoryFacts> {
    (
        btree_map(
            label(),
            (count(), count()).prop_map(|(attempts, successes)| OutcomeTally {
                attempts,
                successes,
            }),
            0..MAX_ENTRIES,
        ),
        ratings(),
    )
        .prop_map(|(categories, topic_ratings)| MemoryFacts {
            categories,
            topic_ratings,
        })
}

fn digest() -> impl Strategy<Value = DecisionDigest> {
    (
        any::<u64>(),
        label(),
        rating(),
        subsequence(EvaluatorId::PERSPECTIVES.to_vec(), 0..=6),
    )
        .prop_map(|(sequence_number, query, confidence, active)| DecisionDigest {
            sequence_number,
            query,
            confidence,
            active,
        })
}

/// Orchestrator signals, including ones the orchestrator itself never produces
pub fn arb_signals() -> impl Strategy<Value = DeliberationSignals> {
    (any::<bool>(), rating(), vec(digest(), 0..8)).prop_map(
        |(conflict_detected, conflict_score, recent_decisions)| DeliberationSignals {
            conflict_detected,
            conflict_score,
            recent_decisions,
        },
    )
}

/// Any combination of present and absent namespaces with hostile contents.
///
/// Signals are left at their default; callers never supply them.
pub fn arb_context() -> impl Strategy<Value = DeliberationContext> {
    (
        option::of(reality()),
        option::of(causality()),
        option::of(equilibrium()),
        option::of(transformation()),
        option::of(simulation()),
        option::of(memory()),
    )
        .prop_map(
            |(reality, causality, equilibrium, transformation, simulation, memory)| {
                DeliberationContext {
                    reality,
                    causality,
                    equilibrium,
                    transformation,
                    simulation,
                    memory,
                    signals: DeliberationSignals::default(),
                }
            },
        )
}
