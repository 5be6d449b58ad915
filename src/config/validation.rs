//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured. Missing resource
//! ids block startup with a user-facing message instead of failing later
//! in the middle of a review.

use super::Settings;
use crate::utils::errors::{EventDeskError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_google_config(&settings.google)?;
    validate_review_config(&settings.review)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate Google API configuration
fn validate_google_config(config: &super::GoogleConfig) -> Result<()> {
    if config.spreadsheet_id.is_empty() {
        return Err(EventDeskError::Config(
            "`google.spreadsheet_id` is not set. Add it to config.toml or EVENTDESK__GOOGLE__SPREADSHEET_ID".to_string(),
        ));
    }

    if config.calendar_id.is_empty() {
        return Err(EventDeskError::Config(
            "`google.calendar_id` is not set. Add it to config.toml or EVENTDESK__GOOGLE__CALENDAR_ID".to_string(),
        ));
    }

    if config.service_account_path.is_empty() {
        return Err(EventDeskError::Config(
            "`google.service_account_path` is required".to_string(),
        ));
    }

    url::Url::parse(&config.sheets_api_url)?;
    url::Url::parse(&config.calendar_api_url)?;

    Ok(())
}

/// Validate review workflow configuration
fn validate_review_config(config: &super::ReviewConfig) -> Result<()> {
    if config.responses_worksheet.is_empty() {
        return Err(EventDeskError::Config(
            "Responses worksheet name is required".to_string(),
        ));
    }

    if config.users_worksheet.is_empty() {
        return Err(EventDeskError::Config(
            "Authorized-users worksheet name is required".to_string(),
        ));
    }

    if config.cache_ttl_seconds == 0 {
        return Err(EventDeskError::Config(
            "Cache TTL must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(EventDeskError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(EventDeskError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}
