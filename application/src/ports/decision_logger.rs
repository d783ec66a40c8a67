//! Port for structured decision logging.
//!
//! Defines the [`DecisionLogger`] trait for persisting every frozen
//! [`DecisionTrace`] to an external decision log, keyed by its trace id.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the full
//! trace in a machine-readable format (JSONL) for later analysis.

use parliament_domain::DecisionTrace;

/// Port for logging frozen decision traces.
///
/// `log` is synchronous and infallible so a failing log never disturbs a
/// deliberation; implementations report their own failures via `tracing`.
pub trait DecisionLogger: Send + Sync {
    fn log(&self, trace: &DecisionTrace);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoDecisionLogger;

impl DecisionLogger for NoDecisionLogger {
    fn log(&self, _trace: &DecisionTrace) {}
}
