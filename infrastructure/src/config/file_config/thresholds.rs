//! Threshold configuration from TOML (`[thresholds]` section)

use parliament_domain::{
    ConfigIssue, ConfigIssueCode, DEFAULT_THRESHOLD, EvaluatorId, EvaluatorThresholds,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Activation threshold per perspective evaluator.
///
/// Synthesis is always active and has no entry; a `synthesis` key lands in
/// `unknown` together with misspelled names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileThresholdsConfig {
    pub reality: f64,
    pub causality: f64,
    pub equilibrium: f64,
    pub transformation: f64,
    pub simulation: f64,
    pub memory: f64,
    #[serde(flatten)]
    pub unknown: BTreeMap<String, toml::Value>,
}

impl Default for FileThresholdsConfig {
    fn default() -> Self {
        Self {
            reality: DEFAULT_THRESHOLD,
            causality: DEFAULT_THRESHOLD,
            equilibrium: DEFAULT_THRESHOLD,
            transformation: DEFAULT_THRESHOLD,
            simulation: DEFAULT_THRESHOLD,
            memory: DEFAULT_THRESHOLD,
            unknown: BTreeMap::new(),
        }
    }
}

impl FileThresholdsConfig {
    fn entries(&self) -> [(EvaluatorId, f64); 6] {
        [
            (EvaluatorId::Reality, self.reality),
            (EvaluatorId::Causality, self.causality),
            (EvaluatorId::Equilibrium, self.equilibrium),
            (EvaluatorId::Transformation, self.transformation),
            (EvaluatorId::Simulation, self.simulation),
            (EvaluatorId::Memory, self.memory),
        ]
    }

    /// Convert to domain thresholds, keeping the default for invalid entries.
    pub fn to_thresholds(&self) -> (EvaluatorThresholds, Vec<ConfigIssue>) {
        let mut thresholds = EvaluatorThresholds::default();
        let mut issues = Vec::new();

        for (id, value) in self.entries() {
            match thresholds.clone().with(id, value) {
                Ok(updated) => thresholds = updated,
                Err(e) => issues.push(ConfigIssue::error(
                    ConfigIssueCode::ThresholdOutOfRange,
                    format!("thresholds.{id}: {e}; using {DEFAULT_THRESHOLD}"),
                )),
            }
        }

        for key in self.unknown.keys() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::UnknownEvaluator,
                format!("thresholds.{key} is not a configurable evaluator; ignored"),
            ));
        }

        (thresholds, issues)
    }
}
