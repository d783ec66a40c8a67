//! Evaluator identifiers

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Identifier of one of the seven fixed evaluators.
///
/// The variant order is the canonical invocation order: the six perspective
/// evaluators first, Synthesis last. `Ord` follows that order, so a
/// `BTreeMap<EvaluatorId, _>` iterates canonically.
///
/// # Example
///
/// ```
/// use parliament_domain::EvaluatorId;
///
/// assert_eq!(EvaluatorId::PERSPECTIVES.len(), 6);
/// assert!(EvaluatorId::Reality < EvaluatorId::Simulation);
/// assert_eq!("memory".parse::<EvaluatorId>().unwrap(), EvaluatorId::Memory);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluatorId {
    /// Reality grounding and embodied constraints
    Reality,
    /// Temporal causality and consequences
    Causality,
    /// Equilibrium and conflict mediation
    Equilibrium,
    /// Transformation and adaptive learning
    Transformation,
    /// Simulation and forward modeling
    Simulation,
    /// Memory and pattern recognition
    Memory,
    /// Always-on synthesis of all perspectives
    Synthesis,
}

impl EvaluatorId {
    /// The six perspective evaluators in canonical invocation order.
    pub const PERSPECTIVES: [EvaluatorId; 6] = [
        EvaluatorId::Reality,
        EvaluatorId::Causality,
        EvaluatorId::Equilibrium,
        EvaluatorId::Transformation,
        EvaluatorId::Simulation,
        EvaluatorId::Memory,
    ];

    /// All seven evaluators, Synthesis last.
    pub const ALL: [EvaluatorId; 7] = [
        EvaluatorId::Reality,
        EvaluatorId::Causality,
        EvaluatorId::Equilibrium,
        EvaluatorId::Transformation,
        EvaluatorId::Simulation,
        EvaluatorId::Memory,
        EvaluatorId::Synthesis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluatorId::Reality => "reality",
            EvaluatorId::Causality => "causality",
            EvaluatorId::Equilibrium => "equilibrium",
            EvaluatorId::Transformation => "transformation",
            EvaluatorId::Simulation => "simulation",
            EvaluatorId::Memory => "memory",
            EvaluatorId::Synthesis => "synthesis",
        }
    }

    /// Capitalized name for console and decision text
    pub fn display_name(&self) -> &'static str {
        match self {
            EvaluatorId::Reality => "Reality",
            EvaluatorId::Causality => "Causality",
            EvaluatorId::Equilibrium => "Equilibrium",
            EvaluatorId::Transformation => "Transformation",
            EvaluatorId::Simulation => "Simulation",
            EvaluatorId::Memory => "Memory",
            EvaluatorId::Synthesis => "Synthesis",
        }
    }

    /// Short human-readable description of the evaluator's perspective
    pub fn perspective(&self) -> &'static str {
        match self {
            EvaluatorId::Reality => "reality grounding",
            EvaluatorId::Causality => "temporal causality",
            EvaluatorId::Equilibrium => "equilibrium",
            EvaluatorId::Transformation => "transformation",
            EvaluatorId::Simulation => "forward simulation",
            EvaluatorId::Memory => "memory and patterns",
            EvaluatorId::Synthesis => "synthesis",
        }
    }

    pub fn is_synthesis(&self) -> bool {
        matches!(self, EvaluatorId::Synthesis)
    }
}

impl std::fmt::Display for EvaluatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EvaluatorId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reality" => Ok(EvaluatorId::Reality),
            "causality" => Ok(EvaluatorId::Causality),
            "equilibrium" => Ok(EvaluatorId::Equilibrium),
            "transformation" => Ok(EvaluatorId::Transformation),
            "simulation" => Ok(EvaluatorId::Simulation),
            "memory" => Ok(EvaluatorId::Memory),
            "synthesis" => Ok(EvaluatorId::Synthesis),
            other => Err(DomainError::UnknownEvaluator(other.to_string())),
        }
    }
}
