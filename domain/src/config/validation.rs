//! Configuration issues
//!
//! Loaders validate configuration values and report problems as structured
//! [`ConfigIssue`]s instead of failing on the first one, so a user sees every
//! problem in one pass.
//!
//! # Examples
//!
//! ```
//! use parliament_domain::{ConfigIssue, ConfigIssueCode, Severity};
//!
//! let issue = ConfigIssue::error(
//!     ConfigIssueCode::ThresholdOutOfRange,
//!     "thresholds.memory = 1.4 is outside [0.0, 1.0]",
//! );
//! assert_eq!(issue.severity, Severity::Error);
//! assert!(issue.to_string().starts_with("error"));
//! ```

use std::fmt;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// An evaluator threshold lies outside `[0.0, 1.0]`.
    ThresholdOutOfRange,
    /// A threshold was set for an evaluator that does not exist or is fixed.
    UnknownEvaluator,
    /// Bounded history retention of zero keeps nothing.
    ZeroRetention,
    /// A recent-history window of zero disables memory enrichment.
    ZeroRecentWindow,
    /// The recent-history window asks for more traces than retention keeps.
    WindowExceedsRetention,
    /// Confidence weights are negative or do not sum to 1.
    UnbalancedConfidenceWeights,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{level}: {}", self.message)
    }
}
