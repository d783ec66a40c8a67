//! Domain layer for kragentic-parliament
//!
//! This crate contains the deliberation core: activation records, decision
//! traces, the seven evaluators and the pure metric functions. It performs
//! no I/O and has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Evaluators
//!
//! Six perspective evaluators (Reality, Causality, Equilibrium,
//! Transformation, Simulation, Memory) each score a query against a rule
//! ladder. An evaluator whose strength reaches its threshold is **active**
//! and produces a response and fired signals; otherwise it is **passive**.
//! The Synthesis evaluator is always active and integrates the others.
//!
//! ## Decision Trace
//!
//! Every deliberation yields an immutable [`DecisionTrace`] with all seven
//! activation records, the invocation order, and derived metrics:
//! sparsity, total activation, confidence, alignment and pattern flags.

pub mod activation;
pub mod config;
pub mod core;
pub mod deliberation;
pub mod evaluator;
pub mod facts;
pub mod trace;

// Re-export commonly used types
pub use activation::{ActivationRecord, ContextSnapshot, EvaluatorId, Perspective};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::error::DomainError;
pub use deliberation::{
    AlignmentRule, CONFLICT_THRESHOLD, ConfidenceWeights, alignment_score, confidence,
    conflict_score, detect_patterns, extract_lineage, sparsity_ratio, total_activation,
};
pub use evaluator::{
    DEFAULT_THRESHOLD, Evaluator, EvaluatorSet, EvaluatorThresholds, SynthesisEvaluator,
};
pub use facts::{
    CausalityFacts, DecisionDigest, DeliberationContext, DeliberationSignals, EquilibriumFacts,
    MemoryFacts, Milestone, OutcomeTally, RealityFacts, SimulationFacts, SkillGap,
    TransformationFacts,
};
pub use trace::{DecisionTrace, LineageEntry, PatternFlag, TraceDraft};
