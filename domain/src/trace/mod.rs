//! Decision traces
//!
//! A deliberation builds a [`TraceDraft`] step by step and freezes it into a
//! [`DecisionTrace`] once Synthesis has run. Frozen traces expose read-only
//! accessors; nothing mutates them after they are returned.

pub mod draft;
pub mod entities;
pub mod flag;

pub use draft::TraceDraft;
pub use entities::{DecisionTrace, LineageEntry};
pub use flag::PatternFlag;
