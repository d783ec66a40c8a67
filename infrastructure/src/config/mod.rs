//! Configuration file loading for kragentic-parliament
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `PARLIAMENT_*` environment variables (`PARLIAMENT_THRESHOLDS__MEMORY=0.5`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./parliament.toml` or `./.parliament.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/kragentic-parliament/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfidenceConfig, FileConfig, FileHistoryConfig, FileLoggingConfig, FileOutputConfig,
    FileOutputFormat, FileThresholdsConfig,
};
pub use loader::ConfigLoader;
