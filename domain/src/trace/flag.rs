//! Pattern flags

use serde::{Deserialize, Serialize};
use std::fmt;

/// An anomaly detected over one deliberation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatternFlag {
    /// Too many perspectives engaged for what may be a simple query
    LowSparsity,
    /// Almost nothing engaged
    HighSparsity,
    /// Simulation ran without Reality grounding it
    UngroundedSimulation,
    /// Transformation ran without Memory backing it
    AhistoricalTransformation,
    /// High conflict and Equilibrium stayed passive after re-evaluation
    UnresolvedConflict,
    /// Total activation across all evaluators exceeded 5.0
    Overactivation,
}

impl PatternFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternFlag::LowSparsity => "LOW_SPARSITY",
            PatternFlag::HighSparsity => "HIGH_SPARSITY",
            PatternFlag::UngroundedSimulation => "UNGROUNDED_SIMULATION",
            PatternFlag::AhistoricalTransformation => "AHISTORICAL_TRANSFORMATION",
            PatternFlag::UnresolvedConflict => "UNRESOLVED_CONFLICT",
            PatternFlag::Overactivation => "OVERACTIVATION",
        }
    }
}

impl fmt::Display for PatternFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_matches_display() {
        for flag in [
            PatternFlag::LowSparsity,
            PatternFlag::UngroundedSimulation,
            PatternFlag::Overactivation,
        ] {
            let json = serde_json::to_string(&flag).unwrap();
            assert_eq!(json, format!("\"{flag}\""));
        }
    }
}
