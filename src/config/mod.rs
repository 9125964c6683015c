//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Scouting report service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Base URL of the generative language API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model to use
    #[serde(default = "default_model")]
    pub model: String,

    /// Timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Sampling temperature, unset leaves the service default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_timeout() -> u64 {
    120
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            base_url: default_base_url(),
            model: default_model(),
            timeout_seconds: default_timeout(),
            temperature: None,
        }
    }
}

impl ReportConfig {
    /// Read the API key from the configured environment variable.
    /// Unset or blank means not configured.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }
}

/// Initial filter selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "default_league")]
    pub league: String,

    #[serde(default = "default_season")]
    pub season: String,
}

fn default_league() -> String {
    "All".to_string()
}

fn default_season() -> String {
    "23/24".to_string()
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            league: default_league(),
            season: default_season(),
        }
    }
}

/// Radar reference maxima. A player at the reference sits on the outer ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceMaxima {
    pub goals: f64,
    pub xg: f64,
    pub assists: f64,
    pub xa: f64,
    pub sca: f64,
    pub progressive_passes: f64,
    /// Tackles plus interceptions
    pub defensive_actions: f64,
}

impl Default for ReferenceMaxima {
    fn default() -> Self {
        Self {
            goals: 30.0,
            xg: 30.0,
            assists: 15.0,
            xa: 15.0,
            sca: 150.0,
            progressive_passes: 350.0,
            defensive_actions: 120.0,
        }
    }
}

impl ReferenceMaxima {
    fn entries(&self) -> [(&'static str, f64); 7] {
        [
            ("goals", self.goals),
            ("xg", self.xg),
            ("assists", self.assists),
            ("xa", self.xa),
            ("sca", self.sca),
            ("progressive_passes", self.progressive_passes),
            ("defensive_actions", self.defensive_actions),
        ]
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub filters: FilterConfig,

    #[serde(default)]
    pub normalization: ReferenceMaxima,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            report: ReportConfig::default(),
            filters: FilterConfig::default(),
            normalization: ReferenceMaxima::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.report.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "Report timeout must be greater than 0".to_string(),
            ));
        }

        if let Err(e) = url::Url::parse(&self.report.base_url) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid report base_url {:?}: {}",
                self.report.base_url, e
            )));
        }

        for (name, value) in self.normalization.entries() {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "Reference maximum for {} must be positive, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}
