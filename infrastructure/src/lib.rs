//! Infrastructure layer for kragentic-parliament
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: configuration file loading, the JSONL
//! decision log and context file reading.

pub mod config;
pub mod context;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfidenceConfig, FileConfig, FileHistoryConfig, FileLoggingConfig,
    FileOutputConfig, FileOutputFormat, FileThresholdsConfig,
};
pub use context::{ContextFileLoader, ContextLoadError};
pub use logging::JsonlDecisionLogger;
