//! Deliberation context files
//!
//! Callers may hand the parliament a pre-built
//! [`DeliberationContext`](parliament_domain::DeliberationContext) stored as
//! JSON or TOML. [`ContextFileLoader`] reads such a file; the format is
//! chosen by extension.
//!
//! ```toml
//! [reality.skills]
//! rust = 2.0
//!
//! [reality.requirements]
//! rust = 4.0
//!
//! [memory.categories.migration]
//! successes = 3
//! failures = 1
//! ```

mod loader;

pub use loader::{ContextFileLoader, ContextLoadError};
