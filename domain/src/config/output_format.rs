//! Output format value object

use serde::{Deserialize, Serialize};

/// How a deliberation result is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Every perspective, metrics and lineage
    Full,
    /// Only the decision text and confidence (default)
    #[default]
    Decision,
    /// The frozen trace as JSON
    Json,
}
