//! Utility modules

pub mod errors;
pub mod logging;

pub use errors::{CalendarError, EventDeskError, Result, SheetsError};
