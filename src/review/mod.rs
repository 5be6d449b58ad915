//! Pure review logic: validation, formatting, recurrence codes
//!
//! Everything in this module is side-effect free and synchronous; the
//! services and the workflow controller decide what to do with the results.

pub mod format;
pub mod recurrence;
pub mod validate;

pub use format::format_description;
pub use recurrence::monthly_byday;
pub use validate::{validate, ValidationReport};
