//! Application layer for kragentic-parliament
//!
//! This crate contains the `Parliament` orchestrator, its parameters, and
//! the port definitions for history, decision logging and progress.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DEFAULT_RECENT_WINDOW, DeliberationParams, HistoryRetention};
pub use ports::{
    decision_logger::{DecisionLogger, NoDecisionLogger},
    observer::{DeliberationObserver, NoObserver},
    trace_log::{InMemoryTraceLog, TraceLog},
};
pub use use_cases::deliberate::{DeliberationError, Parliament};
pub use use_cases::statistics::{EvaluatorStatistics, evaluator_statistics};
