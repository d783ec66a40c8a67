//! Deliberation observer port
//!
//! Callbacks fired while a deliberation runs. Every method has a no-op
//! default so observers implement only what they display.

use parliament_domain::{ActivationRecord, DecisionTrace};

/// Callback for progress updates during a deliberation
///
/// Implementations live in the presentation layer.
pub trait DeliberationObserver: Send + Sync {
    /// Called before the first evaluator runs
    fn on_deliberation_start(&self, _sequence_number: u64, _query: &str) {}

    /// Called after each evaluator invocation, including the Equilibrium
    /// re-evaluation and Synthesis
    fn on_evaluator_complete(&self, _record: &ActivationRecord) {}

    /// Called when conflict crosses the threshold, before Equilibrium runs again
    fn on_equilibrium_reevaluation(&self, _conflict_score: f64) {}

    /// Called once the trace is frozen and stored
    fn on_deliberation_complete(&self, _trace: &DecisionTrace) {}
}

/// No-op observer for when progress reporting is not needed
pub struct NoObserver;

impl DeliberationObserver for NoObserver {}
