//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.
//!
//! ```toml
//! [thresholds]
//! reality = 0.3
//! memory = 0.4
//!
//! [history]
//! retention = 500
//! recent_window = 5
//!
//! [confidence]
//! mean_weight = 0.7
//! coherence_weight = 0.3
//!
//! [logging]
//! decision_log = "~/.local/share/parliament/decisions.jsonl"
//!
//! [output]
//! format = "full"
//! color = true
//! ```

mod confidence;
mod history;
mod logging;
mod output;
mod thresholds;

pub use confidence::FileConfidenceConfig;
pub use history::FileHistoryConfig;
pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use thresholds::FileThresholdsConfig;

use parliament_application::DeliberationParams;
use parliament_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Per-evaluator activation thresholds
    pub thresholds: FileThresholdsConfig,
    /// History retention and memory window
    pub history: FileHistoryConfig,
    /// Confidence weights
    pub confidence: FileConfidenceConfig,
    /// Decision log and diagnostic log destinations
    pub logging: FileLoggingConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. Thresholds within `[0.0, 1.0]`
    /// 2. Retention and recent-window sizes
    /// 3. Confidence weights
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.thresholds.to_thresholds().1);
        issues.extend(self.history.validate());
        issues.extend(self.confidence.to_weights().1);
        issues
    }

    /// Build orchestrator parameters.
    ///
    /// Invalid values fall back to their defaults; call [`validate`](Self::validate)
    /// to report them.
    pub fn to_params(&self) -> DeliberationParams {
        DeliberationParams::default()
            .with_thresholds(self.thresholds.to_thresholds().0)
            .with_retention(self.history.to_retention())
            .with_recent_history_window(self.history.recent_window)
            .with_confidence_weights(self.confidence.to_weights().0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parliament_application::HistoryRetention;
    use parliament_domain::{ConfigIssueCode, EvaluatorId, OutputFormat};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[thresholds]
reality = 0.4
memory = 0.5

[history]
retention = 200
recent_window = 3

[confidence]
mean_weight = 0.6
coherence_weight = 0.4

[logging]
decision_log = "decisions.jsonl"

[output]
format = "full"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_empty());

        let params = config.to_params();
        assert_eq!(params.thresholds.get(EvaluatorId::Reality), 0.4);
        assert_eq!(params.thresholds.get(EvaluatorId::Memory), 0.5);
        assert_eq!(params.thresholds.get(EvaluatorId::Causality), 0.3);
        assert_eq!(params.retention, HistoryRetention::Bounded(200));
        assert_eq!(params.recent_history_window, 3);
        assert_eq!(params.confidence_weights.mean_weight, 0.6);
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.output.color);
        assert_eq!(
            config.logging.decision_log.as_deref(),
            Some(std::path::Path::new("decisions.jsonl"))
        );
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config, FileConfig::default());
        assert_eq!(config.to_params(), DeliberationParams::default());
    }

    #[test]
    fn test_validate_collects_every_issue() {
        let toml_str = r#"
[thresholds]
simulation = 1.5

[history]
retention = 0
recent_window = 0

[confidence]
mean_weight = 0.9
coherence_weight = 0.3
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let codes: Vec<ConfigIssueCode> = config.validate().iter().map(|i| i.code).collect();

        assert_eq!(
            codes,
            vec![
                ConfigIssueCode::ThresholdOutOfRange,
                ConfigIssueCode::ZeroRetention,
                ConfigIssueCode::ZeroRecentWindow,
                ConfigIssueCode::UnbalancedConfidenceWeights,
            ]
        );

        let params = config.to_params();
        assert_eq!(params.thresholds.get(EvaluatorId::Simulation), 0.3);
    }
}
