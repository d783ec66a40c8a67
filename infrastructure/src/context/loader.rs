//! Context file loader

use parliament_domain::DeliberationContext;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors reading a context file
#[derive(Error, Debug)]
pub enum ContextLoadError {
    #[error("could not read context file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in context file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid TOML in context file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unsupported context file extension for {0}; expected .json or .toml")]
    UnsupportedFormat(PathBuf),
}

/// Reads a [`DeliberationContext`] from a `.json` or `.toml` file.
///
/// Orchestrator signals are never read from the file; only the
/// per-perspective namespaces are.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextFileLoader;

impl ContextFileLoader {
    pub fn new() -> Self {
        Self
    }

    pub fn load(&self, path: &Path) -> Result<DeliberationContext, ContextLoadError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str, &Path) -> Result<DeliberationContext, ContextLoadError> =
            match extension.as_deref() {
                Some("json") => Self::parse_json,
                Some("toml") => Self::parse_toml,
                _ => return Err(ContextLoadError::UnsupportedFormat(path.to_path_buf())),
            };

        let content = fs::read_to_string(path).map_err(|source| ContextLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let context = parse(&content, path)?;
        debug!(
            "Loaded context from {} (namespaces: {:?})",
            path.display(),
            context.enriched_namespaces().collect::<Vec<_>>()
        );
        Ok(context)
    }

    fn parse_json(content: &str, path: &Path) -> Result<DeliberationContext, ContextLoadError> {
        serde_json::from_str(content).map_err(|source| ContextLoadError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    fn parse_toml(content: &str, path: &Path) -> Result<DeliberationContext, ContextLoadError> {
        toml::from_str(content).map_err(|source| ContextLoadError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }
}
