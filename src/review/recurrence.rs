//! Monthly recurrence code calculation
//!
//! Maps a calendar date to its "Nth weekday of the month" BYDAY clause
//! for RFC 5545 recurrence rules.

use chrono::{Datelike, NaiveDate};

/// Two-letter weekday codes indexed Monday = 0
const WEEKDAY_CODES: [&str; 7] = ["MO", "TU", "WE", "TH", "FR", "SA", "SU"];

/// Compute the BYDAY clause for "the Nth weekday W of the month" that
/// contains `date`.
///
/// The ordinal is `(day - 1) / 7 + 1`, so the 1st through 7th of a month
/// are the first occurrence of their weekday, the 8th through 14th the
/// second, and so on. Total over all valid dates.
///
/// ```
/// use chrono::NaiveDate;
/// use eventdesk::review::monthly_byday;
///
/// let d = NaiveDate::from_ymd_opt(2025, 8, 23).unwrap(); // 4th Saturday
/// assert_eq!(monthly_byday(d), "BYDAY=4SA;");
/// ```
pub fn monthly_byday(date: NaiveDate) -> String {
    let ordinal = (date.day() - 1) / 7 + 1;
    let weekday = WEEKDAY_CODES[date.weekday().num_days_from_monday() as usize];
    format!("BYDAY={ordinal}{weekday};")
}
