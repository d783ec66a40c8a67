//! Evaluators
//!
//! Six perspective evaluators score a query independently; Synthesis then
//! integrates their responses. Every evaluator is stateless apart from its
//! threshold, and scoring is a [`RuleLadder`] over [`QueryCues`] and the
//! deliberation context.

pub mod causality;
pub mod cues;
pub mod equilibrium;
pub mod memory;
pub mod reality;
pub mod rules;
pub mod set;
pub mod simulation;
pub mod synthesis;
pub mod thresholds;
pub mod traits;
pub mod transformation;

pub use causality::CausalityEvaluator;
pub use cues::{Cue, QueryCues};
pub use equilibrium::EquilibriumEvaluator;
pub use memory::MemoryEvaluator;
pub use reality::RealityEvaluator;
pub use rules::{ActivationRule, LadderOutcome, RuleLadder, SignalRule};
pub use set::EvaluatorSet;
pub use simulation::SimulationEvaluator;
pub use synthesis::SynthesisEvaluator;
pub use thresholds::{DEFAULT_THRESHOLD, EvaluatorThresholds};
pub use traits::Evaluator;
pub use transformation::TransformationEvaluator;
