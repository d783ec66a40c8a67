//! Confidence configuration from TOML (`[confidence]` section)

use parliament_domain::{ConfidenceWeights, ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Raw confidence weights from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfidenceConfig {
    pub mean_weight: f64,
    pub coherence_weight: f64,
}

impl Default for FileConfidenceConfig {
    fn default() -> Self {
        let weights = ConfidenceWeights::default();
        Self {
            mean_weight: weights.mean_weight,
            coherence_weight: weights.coherence_weight,
        }
    }
}

impl FileConfidenceConfig {
    /// Convert to domain weights.
    ///
    /// Negative, non-finite or non-unit-sum weights fall back to the defaults.
    pub fn to_weights(&self) -> (ConfidenceWeights, Vec<ConfigIssue>) {
        let valid = [self.mean_weight, self.coherence_weight]
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0)
            && ((self.mean_weight + self.coherence_weight) - 1.0).abs() < 1e-9;

        if valid {
            (
                ConfidenceWeights {
                    mean_weight: self.mean_weight,
                    coherence_weight: self.coherence_weight,
                },
                Vec::new(),
            )
        } else {
            (
                ConfidenceWeights::default(),
                vec![ConfigIssue::warning(
                    ConfigIssueCode::UnbalancedConfidenceWeights,
                    format!(
                        "confidence weights {} + {} must be non-negative and sum to 1; using 0.7 + 0.3",
                        self.mean_weight, self.coherence_weight
                    ),
                )],
            )
        }
    }
}
