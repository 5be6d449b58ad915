//! Error handling for EventDesk
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the EventDesk application
#[derive(Error, Debug)]
pub enum EventDeskError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Google Sheets error: {0}")]
    Sheets(#[from] SheetsError),

    #[error("Google Calendar error: {0}")]
    Calendar(#[from] CalendarError),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("JWT signing error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Console error: {0}")]
    Console(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Google Sheets API specific errors
#[derive(Error, Debug)]
pub enum SheetsError {
    #[error("Spreadsheet not found: {0}")]
    SpreadsheetNotFound(String),

    #[error("Worksheet '{0}' not found in the spreadsheet")]
    WorksheetNotFound(String),

    #[error("The following required columns are missing from the spreadsheet: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Row {row}: cannot read '{column}' from value '{value}'")]
    InvalidCell {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Sheets API request failed: {0}")]
    RequestFailed(String),
}

/// Google Calendar API specific errors
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error(
        "Failed to add event to calendar '{calendar_id}' (service account: {service_account}): {message}"
    )]
    InsertFailed {
        calendar_id: String,
        service_account: String,
        message: String,
    },

    #[error("Calendar API request failed: {0}")]
    RequestFailed(String),
}

/// Result type alias for EventDesk operations
pub type Result<T> = std::result::Result<T, EventDeskError>;

/// Result type alias for Sheets operations
pub type SheetsResult<T> = std::result::Result<T, SheetsError>;

/// Result type alias for Calendar operations
pub type CalendarResult<T> = std::result::Result<T, CalendarError>;

impl EventDeskError {
    /// Check if the error is recoverable within the current session
    pub fn is_recoverable(&self) -> bool {
        match self {
            EventDeskError::Config(_) => false,
            EventDeskError::Sheets(_) => true,
            EventDeskError::Calendar(_) => true,
            EventDeskError::Authentication(_) => false,
            EventDeskError::PermissionDenied(_) => false,
            EventDeskError::InvalidStateTransition { .. } => false,
            EventDeskError::Http(_) => true,
            EventDeskError::Serialization(_) => false,
            EventDeskError::Jwt(_) => false,
            EventDeskError::Io(_) => true,
            EventDeskError::UrlParse(_) => false,
            EventDeskError::Console(_) => false,
            EventDeskError::InvalidInput(_) => false,
        }
    }
}
