//! Application configuration
//!
//! [`DeliberationParams`] groups everything the orchestrator needs that is
//! not an evaluator rule: thresholds, history retention, the recent-history
//! window and the confidence weights.

mod deliberation_params;

pub use deliberation_params::{DEFAULT_RECENT_WINDOW, DeliberationParams, HistoryRetention};
