//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use url::Url;
use crate::utils::errors::{AssetDeskError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_api_config("inventory", &settings.inventory)?;
    validate_api_config("approvals", &settings.approvals)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate one console's API configuration
fn validate_api_config(name: &str, config: &super::ApiConfig) -> Result<()> {
    if config.api_base_url.is_empty() {
        return Err(AssetDeskError::Config(format!(
            "{} API base URL is required",
            name
        )));
    }

    let url = Url::parse(&config.api_base_url).map_err(|e| {
        AssetDeskError::Config(format!(
            "{} API base URL is invalid: {} ({})",
            name, config.api_base_url, e
        ))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(AssetDeskError::Config(format!(
            "{} API base URL must use http or https, got {}",
            name,
            url.scheme()
        )));
    }

    if config.timeout_seconds == 0 {
        return Err(AssetDeskError::Config(format!(
            "{} API timeout must be greater than 0",
            name
        )));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(AssetDeskError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(AssetDeskError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    let valid_formats = ["pretty", "json"];
    if !valid_formats.contains(&config.format.as_str()) {
        return Err(AssetDeskError::Config(
            format!("Invalid log format: {}. Valid formats: {:?}", config.format, valid_formats)
        ));
    }

    Ok(())
}
