//! Submission model
//!
//! One row of the form-responses worksheet, parsed into named, typed
//! fields at the read boundary. The loose string-keyed cells of the sheet
//! never leave the data access layer.

use std::collections::HashMap;
use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::utils::errors::SheetsError;

/// Column names of the form-responses worksheet
pub mod columns {
    pub const EVENT_NAME: &str = "Event Name";
    pub const DESCRIPTION: &str = "Description";
    pub const EVENT_DATE: &str = "Event Date";
    pub const END_DATE: &str = "End Date";
    pub const START_TIME: &str = "Start Time";
    pub const END_TIME: &str = "End Time";
    pub const LOCATION: &str = "Location";
    pub const EVENT_TYPE: &str = "Event Type";
    pub const ORGANIZATION: &str = "Organization Name";
    pub const PHONE: &str = "Contact Phone Number";
    pub const FEE: &str = "Fee";
    pub const EMAIL: &str = "Email Address";
    pub const STATUS: &str = "Status";
    pub const LAST_UPDATED_BY: &str = "Last Updated By";
}

/// Columns that must be present in the header row for the review queue
/// to operate (the Status / Last Updated By pair is appended separately)
pub const EXPECTED_COLUMNS: &[&str] = &[
    columns::EVENT_NAME,
    columns::LOCATION,
    columns::DESCRIPTION,
    columns::ORGANIZATION,
    columns::EVENT_TYPE,
    columns::FEE,
    columns::EVENT_DATE,
    columns::EMAIL,
    columns::START_TIME,
    columns::END_TIME,
    columns::END_DATE,
];

/// Review status of a submission
///
/// Starts `Pending` and is monotonic: a row that reaches `Ignored` or
/// `AddedToCalendar` leaves the active review queue for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionStatus {
    Pending,
    Ignored,
    AddedToCalendar,
}

impl SubmissionStatus {
    /// Cell value written to the Status column
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "Pending",
            SubmissionStatus::Ignored => "Ignored",
            SubmissionStatus::AddedToCalendar => "Added to Calendar",
        }
    }

    /// Parse a Status cell; unknown or empty values are treated as pending
    pub fn from_cell(value: &str) -> Self {
        match value.trim() {
            "Ignored" => SubmissionStatus::Ignored,
            "Added to Calendar" => SubmissionStatus::AddedToCalendar,
            _ => SubmissionStatus::Pending,
        }
    }

    /// Whether this status excludes the row from the review queue
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SubmissionStatus::Pending)
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One form submission awaiting review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// 0-based index among the data rows; sheet row = `row_index + 2`
    /// (one for the header, one for 1-based sheet numbering)
    pub row_index: usize,
    pub event_name: String,
    pub description: String,
    pub location: String,
    pub event_type: String,
    pub organization: String,
    pub phone: String,
    pub fee: String,
    pub email: String,
    pub event_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub status: SubmissionStatus,
    pub last_updated_by: Option<String>,
}

impl Submission {
    /// End date with the empty-cell default applied: a submission without
    /// an explicit end date ends on its event date.
    pub fn effective_end_date(&self) -> NaiveDate {
        self.end_date.unwrap_or(self.event_date)
    }

    /// Parse a submission from one sheet row.
    ///
    /// `header` maps column names to cell positions; `cells` may be ragged
    /// (trailing empty cells are omitted by the Sheets API).
    pub fn from_row(
        row_index: usize,
        header: &HashMap<String, usize>,
        cells: &[String],
    ) -> Result<Self, SheetsError> {
        let cell = |name: &str| -> &str {
            header
                .get(name)
                .and_then(|&idx| cells.get(idx))
                .map(|s| s.trim())
                .unwrap_or("")
        };

        let event_date = parse_date(cell(columns::EVENT_DATE)).ok_or_else(|| {
            invalid_cell(row_index, columns::EVENT_DATE, cell(columns::EVENT_DATE))
        })?;

        let end_date = match cell(columns::END_DATE) {
            "" => None,
            raw => Some(
                parse_date(raw).ok_or_else(|| invalid_cell(row_index, columns::END_DATE, raw))?,
            ),
        };

        let start_time = match cell(columns::START_TIME) {
            "" => None,
            raw => Some(
                parse_time(raw).ok_or_else(|| invalid_cell(row_index, columns::START_TIME, raw))?,
            ),
        };

        let end_time = match cell(columns::END_TIME) {
            "" => None,
            raw => Some(
                parse_time(raw).ok_or_else(|| invalid_cell(row_index, columns::END_TIME, raw))?,
            ),
        };

        let last_updated_by = match cell(columns::LAST_UPDATED_BY) {
            "" => None,
            actor => Some(actor.to_string()),
        };

        Ok(Submission {
            row_index,
            event_name: cell(columns::EVENT_NAME).to_string(),
            description: cell(columns::DESCRIPTION).to_string(),
            location: cell(columns::LOCATION).to_string(),
            event_type: cell(columns::EVENT_TYPE).to_string(),
            organization: cell(columns::ORGANIZATION).to_string(),
            phone: cell(columns::PHONE).to_string(),
            fee: cell(columns::FEE).to_string(),
            email: cell(columns::EMAIL).to_string(),
            event_date,
            end_date,
            start_time,
            end_time,
            status: SubmissionStatus::from_cell(cell(columns::STATUS)),
            last_updated_by,
        })
    }
}

fn invalid_cell(row_index: usize, column: &str, value: &str) -> SheetsError {
    SheetsError::InvalidCell {
        // Report the sheet row the reviewer sees, not the internal index
        row: row_index + 2,
        column: column.to_string(),
        value: value.to_string(),
    }
}

/// Parse a date cell; the form writes `%m/%d/%Y`, ISO dates are accepted
/// for manually edited rows
fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%m/%d/%Y")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}

/// Parse a time cell in any of the formats the form and manual edits produce
fn parse_time(raw: &str) -> Option<NaiveTime> {
    const FORMATS: &[&str] = &["%H:%M:%S", "%H:%M", "%I:%M:%S %p", "%I:%M %p"];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn header() -> HashMap<String, usize> {
        [
            columns::EVENT_NAME,
            columns::DESCRIPTION,
            columns::EVENT_DATE,
            columns::END_DATE,
            columns::START_TIME,
            columns::END_TIME,
            columns::LOCATION,
            columns::EVENT_TYPE,
            columns::ORGANIZATION,
            columns::PHONE,
            columns::FEE,
            columns::EMAIL,
            columns::STATUS,
            columns::LAST_UPDATED_BY,
        ]
        .iter()
        .enumerate()
        .map(|(i, name)| (name.to_string(), i))
        .collect()
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_full_row() {
        let cells = row(&[
            "Square Dance",
            "A night of dancing",
            "08/23/2025",
            "08/23/2025",
            "19:00",
            "21:30",
            "Grange Hall",
            "Dance",
            "Prairie Arts",
            "555-0100",
            "$10",
            "host@prairiearts.org",
            "",
            "",
        ]);

        let submission = Submission::from_row(0, &header(), &cells).unwrap();
        assert_eq!(submission.event_name, "Square Dance");
        assert_eq!(
            submission.event_date,
            NaiveDate::from_ymd_opt(2025, 8, 23).unwrap()
        );
        assert_eq!(
            submission.start_time,
            Some(NaiveTime::from_hms_opt(19, 0, 0).unwrap())
        );
        assert_eq!(submission.status, SubmissionStatus::Pending);
        assert_eq!(submission.last_updated_by, None);
    }

    #[test]
    fn test_ragged_row_defaults_to_empty_cells() {
        // Trailing cells omitted by the API: only name through date present
        let cells = row(&["Picnic", "Lunch outside", "06/01/2025"]);
        let submission = Submission::from_row(3, &header(), &cells).unwrap();
        assert_eq!(submission.location, "");
        assert_eq!(submission.end_date, None);
        assert_eq!(submission.start_time, None);
        assert_eq!(submission.effective_end_date(), submission.event_date);
    }

    #[test]
    fn test_iso_date_and_am_pm_times_accepted() {
        let cells = row(&[
            "Recital",
            "desc",
            "2025-03-18",
            "",
            "7:30 PM",
            "9:00 PM",
            "Hall",
            "Music",
            "Org",
            "",
            "Free",
            "a@b.co",
        ]);
        let submission = Submission::from_row(1, &header(), &cells).unwrap();
        assert_eq!(
            submission.event_date,
            NaiveDate::from_ymd_opt(2025, 3, 18).unwrap()
        );
        assert_eq!(
            submission.start_time,
            Some(NaiveTime::from_hms_opt(19, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_invalid_date_names_row_and_column() {
        let cells = row(&["Bad", "desc", "not-a-date"]);
        let err = Submission::from_row(4, &header(), &cells).unwrap_err();
        assert_matches!(
            err,
            SheetsError::InvalidCell { row: 6, ref column, .. } if column == columns::EVENT_DATE
        );
    }

    #[test]
    fn test_status_round_trip() {
        assert_eq!(SubmissionStatus::from_cell("Ignored"), SubmissionStatus::Ignored);
        assert_eq!(
            SubmissionStatus::from_cell("Added to Calendar"),
            SubmissionStatus::AddedToCalendar
        );
        assert_eq!(SubmissionStatus::from_cell(""), SubmissionStatus::Pending);
        assert_eq!(SubmissionStatus::from_cell("???"), SubmissionStatus::Pending);
        assert!(SubmissionStatus::Ignored.is_terminal());
        assert!(!SubmissionStatus::Pending.is_terminal());
    }
}
