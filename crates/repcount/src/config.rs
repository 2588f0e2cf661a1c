//! Configuration file support for repcount.
//!
//! Loads `repcount.toml` from the current directory, or the path given with `--config`.

use anyhow::{Context, Result};
use repcount_llm::DEFAULT_MODELS;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The config file name
pub const CONFIG_FILE_NAME: &str = "repcount.toml";

/// Application configuration loaded from `repcount.toml`
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Database file
    pub database: Option<PathBuf>,
    /// User the sessions are recorded for
    pub user: Option<String>,
    /// Completion model settings
    #[serde(default)]
    pub llm: LlmConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct LlmConfig {
    pub enabled: bool,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Models to try, in order
    pub models: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key_env: "GEMINI_API_KEY".to_string(),
            models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
            timeout_secs: 20,
        }
    }
}

impl LlmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

impl AppConfig {
    /// Load configuration from a file.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if the file exists and parses successfully
    /// - `Ok(None)` if the file does not exist
    /// - `Err(...)` if the file exists but fails to parse (hard error)
    pub fn load(config_path: &Path) -> Result<Option<Self>> {
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(Some(config))
    }

    /// Effective user id.
    /// Priority: flag > config file > $USER > "local"
    pub fn user_id(&self, flag: Option<&str>) -> String {
        let non_blank = |user: &String| !user.trim().is_empty();
        flag.map(str::to_string)
            .filter(non_blank)
            .or_else(|| self.user.clone().filter(non_blank))
            .or_else(|| std::env::var("USER").ok().filter(non_blank))
            .unwrap_or_else(|| "local".to_string())
    }

    /// Effective database path, if one was given.
    /// Priority: flag > config file
    pub fn database_path(&self, flag: Option<&Path>) -> Option<PathBuf> {
        flag.map(Path::to_path_buf).or_else(|| self.database.clone())
    }
}
