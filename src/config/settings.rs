//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from configuration files and environment variables.

use std::path::Path;
use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub inventory: ApiConfig,
    pub approvals: ApiConfig,
    pub logging: LoggingConfig,
}

/// Backend API configuration for one console
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    pub api_base_url: String,
    pub timeout_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file_path: Option<String>,
}

impl Settings {
    /// Load settings from the default `config` file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::load(config::File::with_name("config").required(false))
    }

    /// Load settings from an explicit configuration file
    pub fn from_file(path: &Path) -> Result<Self, config::ConfigError> {
        Self::load(config::File::from(path).required(true))
    }

    fn load<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let defaults = Settings::default();

        let settings = config::Config::builder()
            .set_default("inventory.api_base_url", defaults.inventory.api_base_url)?
            .set_default("inventory.timeout_seconds", defaults.inventory.timeout_seconds)?
            .set_default("approvals.api_base_url", defaults.approvals.api_base_url)?
            .set_default("approvals.timeout_seconds", defaults.approvals.timeout_seconds)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.format", defaults.logging.format)?
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("ASSETDESK")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::AssetDeskError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            inventory: ApiConfig {
                api_base_url: "http://localhost:8000".to_string(),
                timeout_seconds: 30,
            },
            approvals: ApiConfig {
                api_base_url: "http://localhost:5173".to_string(),
                timeout_seconds: 30,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
                file_path: None,
            },
        }
    }
}
