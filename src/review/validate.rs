//! Submission validation
//!
//! Field-level checks run against the edited draft on every render of the
//! editor. Blocking errors keep the ignore/add actions out of reach;
//! warnings are surfaced but do not block.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::{columns, Submission};

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,6}$";

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

/// Outcome of validating one submission draft
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Blocking problems; the draft cannot be actioned while any remain
    pub errors: Vec<String>,
    /// Non-blocking advisories, always surfaced to the reviewer
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a submission draft for required fields and logical consistency.
///
/// Never mutates the draft; the caller decides how to surface the report.
pub fn validate(submission: &Submission) -> ValidationReport {
    let mut report = ValidationReport::default();

    let required: &[(&str, &str)] = &[
        (columns::EVENT_NAME, &submission.event_name),
        (columns::LOCATION, &submission.location),
        (columns::DESCRIPTION, &submission.description),
        (columns::ORGANIZATION, &submission.organization),
        (columns::EVENT_TYPE, &submission.event_type),
        (columns::FEE, &submission.fee),
        (columns::EMAIL, &submission.email),
    ];
    for (name, value) in required {
        if value.trim().is_empty() {
            report
                .errors
                .push(format!("The field '{name}' is required and cannot be empty."));
        }
    }

    let end_date = submission.effective_end_date();
    let any_time_set = submission.start_time.is_some() || submission.end_time.is_some();
    if end_date < submission.event_date {
        report
            .errors
            .push("End Date cannot be earlier than Event Date.".to_string());
    } else if end_date > submission.event_date {
        if any_time_set {
            report.warnings.push(
                "This is a multi-day event: it will run from the start time on the first day \
                 to the end time on the last day."
                    .to_string(),
            );
        }
    } else if any_time_set {
        match (submission.start_time, submission.end_time) {
            (None, Some(_)) => report
                .errors
                .push("If End Time is set, Start Time must also be set.".to_string()),
            (Some(_), None) => report
                .errors
                .push("If Start Time is set, End Time must also be set.".to_string()),
            (Some(start), Some(end)) if end < start => report
                .errors
                .push("End Time must be after Start Time.".to_string()),
            _ => {}
        }
    }

    if !email_regex().is_match(&submission.email) {
        report.errors.push(format!(
            "Email '{}' is not valid. Please enter a valid email address.",
            submission.email
        ));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn valid_submission() -> Submission {
        Submission {
            row_index: 0,
            event_name: "Barn Dance".to_string(),
            description: "An evening of dancing".to_string(),
            location: "Grange Hall".to_string(),
            event_type: "Dance".to_string(),
            organization: "Prairie Arts".to_string(),
            phone: "555-0100".to_string(),
            fee: "$10".to_string(),
            email: "host@prairiearts.org".to_string(),
            event_date: NaiveDate::from_ymd_opt(2025, 8, 23).unwrap(),
            end_date: Some(NaiveDate::from_ymd_opt(2025, 8, 23).unwrap()),
            start_time: None,
            end_time: None,
            status: crate::models::SubmissionStatus::Pending,
            last_updated_by: None,
        }
    }

    #[test]
    fn test_valid_submission_passes() {
        let report = validate(&valid_submission());
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_missing_required_field_names_the_field() {
        let mut submission = valid_submission();
        submission.fee.clear();
        let report = validate(&submission);
        assert!(!report.is_valid());
        assert!(report.errors.iter().any(|e| e.contains("'Fee'")));
    }

    #[test]
    fn test_every_required_field_is_checked() {
        let mut submission = valid_submission();
        submission.event_name.clear();
        submission.location.clear();
        submission.description.clear();
        submission.organization.clear();
        submission.event_type.clear();
        submission.fee.clear();
        submission.email.clear();
        let report = validate(&submission);
        // 7 required-field errors plus the email format error
        assert_eq!(report.errors.len(), 8);
    }

    #[test]
    fn test_end_date_before_event_date_rejected() {
        let mut submission = valid_submission();
        submission.end_date = Some(NaiveDate::from_ymd_opt(2025, 8, 22).unwrap());
        let report = validate(&submission);
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("End Date cannot be earlier")));
    }

    #[test]
    fn test_equal_dates_no_times_accepted() {
        let report = validate(&valid_submission());
        assert!(report.is_valid());
    }

    #[test]
    fn test_missing_end_date_defaults_to_event_date() {
        let mut submission = valid_submission();
        submission.end_date = None;
        assert!(validate(&submission).is_valid());
    }

    #[test]
    fn test_multi_day_with_times_warns_but_passes() {
        let mut submission = valid_submission();
        submission.end_date = Some(NaiveDate::from_ymd_opt(2025, 8, 25).unwrap());
        submission.start_time = NaiveTime::from_hms_opt(19, 0, 0);
        let report = validate(&submission);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("multi-day event"));
    }

    #[test]
    fn test_start_time_without_end_time_rejected() {
        let mut submission = valid_submission();
        submission.start_time = NaiveTime::from_hms_opt(19, 0, 0);
        let report = validate(&submission);
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("End Time must also be set")));
    }

    #[test]
    fn test_end_time_without_start_time_rejected() {
        let mut submission = valid_submission();
        submission.end_time = NaiveTime::from_hms_opt(21, 0, 0);
        let report = validate(&submission);
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("Start Time must also be set")));
    }

    #[test]
    fn test_end_time_before_start_time_rejected() {
        let mut submission = valid_submission();
        submission.start_time = NaiveTime::from_hms_opt(21, 0, 0);
        submission.end_time = NaiveTime::from_hms_opt(19, 0, 0);
        let report = validate(&submission);
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("End Time must be after Start Time")));
    }

    #[test]
    fn test_malformed_email_rejected_naming_value() {
        let mut submission = valid_submission();
        submission.email = "not-an-email".to_string();
        let report = validate(&submission);
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("'not-an-email' is not valid")));
    }

    #[test]
    fn test_short_but_wellformed_email_accepted() {
        let mut submission = valid_submission();
        submission.email = "a@b.co".to_string();
        assert!(validate(&submission).is_valid());
    }
}
