//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL decision log; one line per frozen trace
    pub decision_log: Option<PathBuf>,
    /// Diagnostic (`tracing`) log file
    pub log_file: Option<PathBuf>,
}
