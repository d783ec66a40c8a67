//! History configuration from TOML (`[history]` section)

use parliament_application::{DEFAULT_RECENT_WINDOW, HistoryRetention};
use parliament_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Raw history configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHistoryConfig {
    /// Maximum retained traces; absent means unbounded
    pub retention: Option<usize>,
    /// Past traces digested into the Memory context
    pub recent_window: usize,
}

impl Default for FileHistoryConfig {
    fn default() -> Self {
        Self {
            retention: None,
            recent_window: DEFAULT_RECENT_WINDOW,
        }
    }
}

impl FileHistoryConfig {
    /// Zero retention is treated as unbounded
    pub fn to_retention(&self) -> HistoryRetention {
        match self.retention {
            None | Some(0) => HistoryRetention::Unbounded,
            Some(max) => HistoryRetention::Bounded(max),
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.retention == Some(0) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroRetention,
                "history.retention = 0 would keep no history; omit it for unbounded retention",
            ));
        }
        if self.recent_window == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroRecentWindow,
                "history.recent_window = 0 disables memory of recent decisions",
            ));
        }
        if let Some(max) = self.retention.filter(|max| *max > 0 && self.recent_window > *max) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::WindowExceedsRetention,
                format!(
                    "history.recent_window = {} exceeds history.retention = {max}; only {max} traces are available",
                    self.recent_window
                ),
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_exceeding_retention_warns() {
        let config = FileHistoryConfig {
            retention: Some(2),
            recent_window: 5,
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::WindowExceedsRetention);
        assert!(!issues[0].is_error());
        assert_eq!(config.to_retention(), HistoryRetention::Bounded(2));
    }

    #[test]
    fn test_default_is_unbounded() {
        let config = FileHistoryConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.to_retention(), HistoryRetention::Unbounded);
    }
}
