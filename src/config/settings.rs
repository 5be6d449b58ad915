//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub google: GoogleConfig,
    #[serde(default)]
    pub review: ReviewConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Google API configuration: service account plus the two resource ids
/// the review desk operates on
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GoogleConfig {
    pub service_account_path: String,
    pub spreadsheet_id: String,
    pub calendar_id: String,
    /// Base URL of the Sheets API, overridable for tests
    #[serde(default = "default_sheets_api_url")]
    pub sheets_api_url: String,
    /// Base URL of the Calendar API, overridable for tests
    #[serde(default = "default_calendar_api_url")]
    pub calendar_api_url: String,
}

/// Review workflow configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReviewConfig {
    /// Worksheet holding the form responses
    pub responses_worksheet: String,
    /// Worksheet holding the authorized reviewer emails
    pub users_worksheet: String,
    /// How long successful sheet reads are memoized
    pub cache_ttl_seconds: u64,
}

/// Reviewer identity supplied by the deployment environment
///
/// The login/logout redirects of the real identity provider live outside
/// this process; the console build is handed an already-established session.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    pub reviewer_name: Option<String>,
    pub reviewer_email: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

fn default_sheets_api_url() -> String {
    "https://sheets.googleapis.com".to_string()
}

fn default_calendar_api_url() -> String {
    "https://www.googleapis.com".to_string()
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            responses_worksheet: "Form Responses 1".to_string(),
            users_worksheet: "Authorized Users".to_string(),
            cache_ttl_seconds: 300,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: "./logs".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("EVENTDESK").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::EventDeskError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            google: GoogleConfig {
                service_account_path: String::new(),
                spreadsheet_id: String::new(),
                calendar_id: String::new(),
                sheets_api_url: default_sheets_api_url(),
                calendar_api_url: default_calendar_api_url(),
            },
            review: ReviewConfig::default(),
            session: SessionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
