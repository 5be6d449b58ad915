//! Event description formatting
//!
//! Combines the reviewer-edited free text with the structured submission
//! fields into the HTML description stored on the calendar event.

use crate::models::Submission;

/// Format the full event description as HTML.
///
/// Fixed order: free-text description, then submitter, event type, fee
/// and contact email on their own lines.
pub fn format_description(submission: &Submission) -> String {
    format!(
        "<p>{}</p>\
         <p><strong>Submitter:</strong> {}<br>\
         <strong>Event Type:</strong> {}<br>\
         <strong>Fee:</strong> {}<br>\
         <strong>Email:</strong> {}</p>",
        submission.description,
        submission.organization,
        submission.event_type,
        submission.fee,
        submission.email,
    )
}
