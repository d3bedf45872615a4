/// Persisted configuration: a small TOML file under the platform config dir.
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::pipeline::CliError;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "SUBLIME_API_KEY";
/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "SUBLIME_API_URL";
/// Base URL used when neither the environment nor the file sets one.
pub const DEFAULT_API_URL: &str = "https://api.sublimesecurity.com/v1";

/// Configuration values the client understands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// API key sent with every request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// API base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

impl Config {
    /// Overlay non-empty environment values on top of the file values.
    #[must_use]
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV).filter(|v| !v.is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.is_empty()) {
            self.api_url = Some(url);
        }
        self
    }

    /// Effective API base URL.
    #[must_use]
    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }
}

/// Source of configuration for the pipeline.
pub trait ConfigSource {
    /// Load the persisted config with environment overrides applied.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` if the store exists but cannot be read.
    fn load(&self) -> Result<Config, CliError>;

    /// Persist `config`, returning where it was written.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` if the store cannot be written.
    fn save(&self, config: &Config) -> Result<PathBuf, CliError>;
}

/// Config stored as `<config_dir>/sublime/config.toml`.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: Option<PathBuf>,
}

impl FileConfigStore {
    /// Store at an explicit path.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Store at the platform default location, if one can be determined.
    #[must_use]
    pub fn default_location() -> Self {
        Self {
            path: dirs::config_dir().map(|d| d.join("sublime").join("config.toml")),
        }
    }

    /// Read the file only, without environment overrides. A missing file is
    /// an empty config.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` on read or parse failure.
    pub fn read_file(&self) -> Result<Config, CliError> {
        let Some(path) = &self.path else {
            return Ok(Config::default());
        };
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => {
                return Err(CliError::Config(format!(
                    "failed to read {}: {e}",
                    path.display()
                )));
            }
        };
        toml::from_str(&raw)
            .map_err(|e| CliError::Config(format!("failed to parse {}: {e}", path.display())))
    }
}

impl ConfigSource for FileConfigStore {
    fn load(&self) -> Result<Config, CliError> {
        Ok(self
            .read_file()?
            .with_env_overrides(|name| std::env::var(name).ok()))
    }

    fn save(&self, config: &Config) -> Result<PathBuf, CliError> {
        let path = self.path.as_ref().ok_or_else(|| {
            CliError::Config("could not determine the configuration directory".to_owned())
        })?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                CliError::Config(format!("failed to create {}: {e}", parent.display()))
            })?;
        }
        let raw = toml::to_string_pretty(config)
            .map_err(|e| CliError::Config(format!("failed to serialize config: {e}")))?;
        fs::write(path, raw)
            .map_err(|e| CliError::Config(format!("failed to write {}: {e}", path.display())))?;
        Ok(path.clone())
    }
}
