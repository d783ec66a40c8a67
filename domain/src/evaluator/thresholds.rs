//! Per-evaluator activation thresholds

use crate::activation::EvaluatorId;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Default threshold for every perspective evaluator
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Synthesis is always active
pub const SYNTHESIS_THRESHOLD: f64 = 0.0;

/// Activation thresholds for the six perspective evaluators.
///
/// Threshold tuning is a manual configuration change; nothing in the engine
/// adjusts these values.
///
/// # Example
///
/// ```
/// use parliament_domain::{EvaluatorId, EvaluatorThresholds};
///
/// let thresholds = EvaluatorThresholds::default()
///     .with(EvaluatorId::Memory, 0.5)
///     .unwrap();
/// assert_eq!(thresholds.get(EvaluatorId::Memory), 0.5);
/// assert_eq!(thresholds.get(EvaluatorId::Synthesis), 0.0);
/// assert!(thresholds.clone().with(EvaluatorId::Reality, 1.5).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorThresholds {
    reality: f64,
    causality: f64,
    equilibrium: f64,
    transformation: f64,
    simulation: f64,
    memory: f64,
}

impl Default for EvaluatorThresholds {
    fn default() -> Self {
        Self {
            reality: DEFAULT_THRESHOLD,
            causality: DEFAULT_THRESHOLD,
            equilibrium: DEFAULT_THRESHOLD,
            transformation: DEFAULT_THRESHOLD,
            simulation: DEFAULT_THRESHOLD,
            memory: DEFAULT_THRESHOLD,
        }
    }
}

impl EvaluatorThresholds {
    pub fn get(&self, id: EvaluatorId) -> f64 {
        match id {
            EvaluatorId::Reality => self.reality,
            EvaluatorId::Causality => self.causality,
            EvaluatorId::Equilibrium => self.equilibrium,
            EvaluatorId::Transformation => self.transformation,
            EvaluatorId::Simulation => self.simulation,
            EvaluatorId::Memory => self.memory,
            EvaluatorId::Synthesis => SYNTHESIS_THRESHOLD,
        }
    }

    /// Replace one threshold.
    ///
    /// Rejects values outside `[0.0, 1.0]` and any attempt to move the
    /// Synthesis threshold off zero.
    pub fn with(mut self, id: EvaluatorId, threshold: f64) -> Result<Self, DomainError> {
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(DomainError::InvalidThreshold {
                evaluator: id,
                threshold,
            });
        }

        let slot = match id {
            EvaluatorId::Reality => &mut self.reality,
            EvaluatorId::Causality => &mut self.causality,
            EvaluatorId::Equilibrium => &mut self.equilibrium,
            EvaluatorId::Transformation => &mut self.transformation,
            EvaluatorId::Simulation => &mut self.simulation,
            EvaluatorId::Memory => &mut self.memory,
            EvaluatorId::Synthesis if threshold == SYNTHESIS_THRESHOLD => return Ok(self),
            EvaluatorId::Synthesis => {
                return Err(DomainError::InvalidThreshold {
                    evaluator: id,
                    threshold,
                });
            }
        };
        *slot = threshold;
        Ok(self)
    }
}
