//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_DIR: &str = "kragentic-parliament";
const PROJECT_FILES: [&str; 2] = ["parliament.toml", ".parliament.toml"];
const ENV_PREFIX: &str = "PARLIAMENT_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `PARLIAMENT_*` environment variables, `__` separating sections
    /// 2. Explicit config path (if provided, must exist)
    /// 3. Project root: `./parliament.toml` or `./.parliament.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/kragentic-parliament/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Self::file_figment(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
            config_path.map(PathBuf::as_path),
        )?;
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load only the given file layered over defaults, ignoring every other source.
    pub fn load_file(path: &Path) -> Result<FileConfig, Box<figment::Error>> {
        Self::file_figment(None, None, Some(path))?
            .extract()
            .map_err(Box::new)
    }

    fn file_figment(
        global: Option<&Path>,
        project: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<Figment, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in [global, project].into_iter().flatten() {
            if path.exists() {
                debug!("Merging config file {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Box::new(figment::Error::from(format!(
                    "config file not found: {}",
                    path.display()
                ))));
            }
            debug!("Merging explicit config file {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        Ok(figment)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/kragentic-parliament/config.toml if set,
    /// otherwise falls back to ~/.config/kragentic-parliament/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for --show-config)
    pub fn print_config_sources(explicit: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");
        println!("  [     ] Env:     {ENV_PREFIX}<SECTION>__<KEY>");

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{mark:<5}] Explicit: {}", path.display());
        }

        match Self::project_config_path() {
            Some(path) => println!("  [FOUND] Project: {}", path.display()),
            None => println!("  [     ] Project: ./parliament.toml or ./.parliament.toml"),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            println!("  [{mark}] Global:  {}", path.display());
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parliament_application::HistoryRetention;
    use parliament_domain::{EvaluatorId, OutputFormat};

    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.thresholds.memory, 0.3);
        assert_eq!(config.history.retention, None);
        assert!(config.output.color);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains(APP_DIR));
    }

    #[test]
    fn test_load_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "parliament.toml",
            "[thresholds]\nmemory = 0.6\n\n[history]\nretention = 10\n\n[output]\nformat = \"json\"\n",
        );

        let config = ConfigLoader::load_file(&path).unwrap();
        let params = config.to_params();

        assert_eq!(params.thresholds.get(EvaluatorId::Memory), 0.6);
        assert_eq!(params.thresholds.get(EvaluatorId::Reality), 0.3);
        assert_eq!(params.retention, HistoryRetention::Bounded(10));
        assert_eq!(config.output.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_later_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let global = write(
            dir.path(),
            "global.toml",
            "[thresholds]\nreality = 0.5\ncausality = 0.5\n",
        );
        let project = write(dir.path(), "project.toml", "[thresholds]\nreality = 0.7\n");

        let config: FileConfig = ConfigLoader::file_figment(Some(&global), Some(&project), None)
            .unwrap()
            .extract()
            .unwrap();

        assert_eq!(config.thresholds.reality, 0.7);
        assert_eq!(config.thresholds.causality, 0.5);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(ConfigLoader::load_file(&missing).is_err());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "bad.toml", "[history]\nretention = \"lots\"\n");
        assert!(ConfigLoader::load_file(&path).is_err());
    }
}
