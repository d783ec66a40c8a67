//! Presentation layer for kragentic-parliament
//!
//! This crate contains the CLI definition, the console formatter
//! and the console progress observer.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::ConsoleProgress;
