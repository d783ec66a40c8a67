//! Deliberation parameters

use parliament_domain::{ConfidenceWeights, EvaluatorThresholds};
use serde::{Deserialize, Serialize};

/// Default number of past traces attached to the context for Memory
pub const DEFAULT_RECENT_WINDOW: usize = 5;

/// How many frozen traces the in-memory history keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryRetention {
    /// Keep every trace for the lifetime of the orchestrator
    #[default]
    Unbounded,
    /// Keep at most this many traces, evicting the oldest first
    Bounded(usize),
}

impl HistoryRetention {
    /// Maximum number of retained traces, `None` when unbounded
    pub fn capacity(&self) -> Option<usize> {
        match self {
            HistoryRetention::Unbounded => None,
            HistoryRetention::Bounded(max) => Some(*max),
        }
    }

    /// A zero bound would keep no history at all and starve Memory of
    /// recent decisions; it is treated as unbounded.
    pub fn normalized(self) -> Self {
        match self {
            HistoryRetention::Bounded(0) => HistoryRetention::Unbounded,
            other => other,
        }
    }
}

/// Orchestrator parameters.
///
/// # Example
///
/// ```
/// use parliament_application::{DeliberationParams, HistoryRetention};
///
/// let params = DeliberationParams::default()
///     .with_retention(HistoryRetention::Bounded(100))
///     .with_recent_history_window(3);
/// assert_eq!(params.recent_history_window, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliberationParams {
    pub thresholds: EvaluatorThresholds,
    pub retention: HistoryRetention,
    /// Number of most recent traces digested into the Memory context
    pub recent_history_window: usize,
    pub confidence_weights: ConfidenceWeights,
}

impl Default for DeliberationParams {
    fn default() -> Self {
        Self {
            thresholds: EvaluatorThresholds::default(),
            retention: HistoryRetention::default(),
            recent_history_window: DEFAULT_RECENT_WINDOW,
            confidence_weights: ConfidenceWeights::default(),
        }
    }
}

impl DeliberationParams {
    // ==================== Builder Methods ====================

    pub fn with_thresholds(mut self, thresholds: EvaluatorThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Set the retention policy; `Bounded(0)` becomes `Unbounded`
    pub fn with_retention(mut self, retention: HistoryRetention) -> Self {
        self.retention = retention.normalized();
        self
    }

    pub fn with_recent_history_window(mut self, window: usize) -> Self {
        self.recent_history_window = window;
        self
    }

    pub fn with_confidence_weights(mut self, weights: ConfidenceWeights) -> Self {
        self.confidence_weights = weights;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parliament_domain::EvaluatorId;

    #[test]
    fn test_defaults() {
        let params = DeliberationParams::default();
        assert_eq!(params.recent_history_window, 5);
        assert_eq!(params.retention, HistoryRetention::Unbounded);
        assert_eq!(params.confidence_weights.mean_weight, 0.7);
        assert_eq!(params.thresholds.get(EvaluatorId::Memory), 0.3);
    }

    #[test]
    fn test_retention_capacity() {
        assert_eq!(HistoryRetention::Unbounded.capacity(), None);
        assert_eq!(HistoryRetention::Bounded(10).capacity(), Some(10));
    }

    #[test]
    fn test_zero_retention_is_unbounded() {
        assert_eq!(HistoryRetention::Bounded(0).normalized(), HistoryRetention::Unbounded);
        assert_eq!(HistoryRetention::Bounded(3).normalized(), HistoryRetention::Bounded(3));

        let params = DeliberationParams::default().with_retention(HistoryRetention::Bounded(0));
        assert_eq!(params.retention, HistoryRetention::Unbounded);
    }
}
