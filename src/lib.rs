//! EventDesk
//!
//! A review desk for community event submissions. Pending form responses
//! are pulled from a Google Sheet, checked and corrected by an
//! authorized reviewer, and on approval pushed to a Google Calendar with
//! the decision written back to the sheet.

pub mod config;
pub mod models;
pub mod review;
pub mod services;
pub mod utils;
pub mod workflow;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{EventDeskError, Result};

// Re-export main components for easy access
pub use models::{Submission, SubmissionStatus, UserIdentity};
pub use services::ServiceFactory;
pub use workflow::{ConsoleUi, ReviewController, ReviewState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
