//! Data models

pub mod submission;
pub mod user;

pub use submission::{columns, Submission, SubmissionStatus, EXPECTED_COLUMNS};
pub use user::UserIdentity;
