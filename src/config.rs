use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app::ActiveView;
use crate::error::{ConfigError, Result};
use crate::logging::LogConfig;

/// Environment variable that overrides the estimator address
pub const API_URL_ENV: &str = "PACEZONES_API_URL";

/// Local development estimator
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Estimation service settings
    pub estimator: EstimatorSettings,

    /// General application settings
    pub settings: AppSettings,

    /// Logging output settings
    pub logging: LogConfig,
}

/// Estimation service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorSettings {
    /// Base address; `/submit` is appended
    pub base_url: String,

    /// Whole-request timeout. Unset means wait indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl EstimatorSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// General application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// View shown first in interactive mode
    pub default_view: ActiveView,
}

/// Configuration management implementation
impl AppConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

        let config: AppConfig = toml::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let write_err = |reason: String| ConfigError::Write {
            path: path.to_path_buf(),
            reason,
        };

        // Create directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| write_err(err.to_string()))?;
        }

        let toml_content = self.to_toml()?;
        fs::write(path, toml_content).map_err(|err| write_err(err.to_string()))?;

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|err| {
            ConfigError::InvalidValue {
                key: "config".to_string(),
                value: err.to_string(),
            }
            .into()
        })
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".pacezones")
            .join("config.toml")
    }

    /// Load configuration with fallback to defaults
    pub fn load_or_default() -> Self {
        let config_path = Self::default_config_path();

        match Self::load_from_file(&config_path) {
            Ok(config) => config,
            Err(err) => {
                tracing::debug!(path = %config_path.display(), error = %err, "Using default configuration");
                Self::default()
            }
        }
    }

    /// Apply the environment override for the estimator address
    pub fn apply_env(&mut self) {
        self.apply_api_url(std::env::var(API_URL_ENV).ok());
    }

    /// Replace the estimator address if `url` is set and non-blank
    pub fn apply_api_url(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.estimator.base_url = url.trim().to_string();
        }
    }
}
