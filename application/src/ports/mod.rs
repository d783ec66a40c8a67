//! Ports (interfaces) for external collaborators
//!
//! These traits define the boundaries between the orchestrator and the
//! outside world. Implementations live in the infrastructure and
//! presentation layers.

pub mod decision_logger;
pub mod observer;
pub mod trace_log;
