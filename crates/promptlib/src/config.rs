//! Project configuration file support for promptlib.
//!
//! Loads configuration from `promptlib.toml` in the working directory.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Project-level configuration loaded from `promptlib.toml`
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Directory holding the saved-prompt slot
    pub storage_dir: Option<PathBuf>,
    /// Replacement template catalog (TOML)
    pub catalog: Option<PathBuf>,
    /// Default log level when RUST_LOG is unset
    pub log_level: Option<String>,
}

/// The config file name
pub const CONFIG_FILE_NAME: &str = "promptlib.toml";

/// Log level used when neither the CLI nor the config file sets one
pub const DEFAULT_LOG_LEVEL: &str = "warn";

impl ProjectConfig {
    /// Load configuration from the working directory.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if file exists and parses successfully
    /// - `Ok(None)` if file does not exist
    /// - `Err(...)` if file exists but fails to parse (hard error)
    pub fn load(working_dir: &Path) -> Result<Option<Self>> {
        let config_path = working_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let mut config: ProjectConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        // Relative paths in the file are relative to the file, not the shell
        config.storage_dir = config.storage_dir.map(|p| working_dir.join(p));
        config.catalog = config.catalog.map(|p| working_dir.join(p));

        Ok(Some(config))
    }

    /// Effective storage directory.
    /// Priority: CLI flag > config file > None (backend default)
    pub fn storage_dir(&self, flag: Option<&Path>) -> Option<PathBuf> {
        flag.map(Path::to_path_buf).or_else(|| self.storage_dir.clone())
    }

    /// Effective catalog path.
    /// Priority: CLI flag > config file > None (built-in catalog)
    pub fn catalog(&self, flag: Option<&Path>) -> Option<PathBuf> {
        flag.map(Path::to_path_buf).or_else(|| self.catalog.clone())
    }

    /// Effective log level.
    /// Priority: CLI flag > config file > DEFAULT_LOG_LEVEL
    pub fn log_level<'a>(&'a self, flag: Option<&'a str>) -> &'a str {
        flag.or(self.log_level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }
}
