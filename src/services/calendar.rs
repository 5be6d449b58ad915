//! Google Calendar event creation
//!
//! Builds the events API payload from a reviewed submission and inserts
//! it into the configured calendar. Payload construction is a pure
//! function so the date-only / timed / recurring variants are testable
//! without a server.

use std::time::Duration;

use chrono::Days;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::config::Settings;
use crate::models::Submission;
use crate::review::{format_description, monthly_byday};
use crate::services::google_auth::GoogleAuthService;
use crate::utils::errors::{CalendarError, EventDeskError, Result};
use crate::utils::logging::log_api_error;

/// All timed events are created in this zone; the form collects local
/// times without an offset.
const EVENT_TIME_ZONE: &str = "America/Chicago";

/// Event insertion service over the configured calendar
#[derive(Clone)]
pub struct CalendarService {
    client: reqwest::Client,
    auth: GoogleAuthService,
    settings: Settings,
}

impl CalendarService {
    pub fn new(auth: GoogleAuthService, settings: Settings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("EventDesk/1.0")
            .build()
            .map_err(EventDeskError::Http)?;

        Ok(Self {
            client,
            auth,
            settings,
        })
    }

    /// Insert `submission` as a calendar event, optionally recurring
    /// monthly on its "Nth weekday" pattern. Returns the created event's
    /// html link when the API provides one.
    pub async fn add_event(
        &self,
        submission: &Submission,
        repeat_monthly: bool,
    ) -> Result<Option<String>> {
        let calendar_id = &self.settings.google.calendar_id;
        if calendar_id.is_empty() {
            return Err(EventDeskError::Config(
                "No calendar id configured; set EVENTDESK__GOOGLE__CALENDAR_ID".to_string(),
            ));
        }

        let payload = build_event(submission, repeat_monthly);
        let url = format!(
            "{}/calendar/v3/calendars/{}/events",
            self.settings.google.calendar_api_url,
            urlencoding::encode(calendar_id),
        );
        let token = self.auth.access_token().await?;

        debug!(url = %url, event = %submission.event_name, "Inserting calendar event");
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await
            .map_err(EventDeskError::Http)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log_api_error(
                "calendar",
                &format!("HTTP {status}: {body}"),
                Some(calendar_id),
            );
            return Err(CalendarError::InsertFailed {
                calendar_id: calendar_id.clone(),
                service_account: self.auth.client_email().to_string(),
                message: format!("HTTP {status}: {body}"),
            }
            .into());
        }

        let created: Value = response.json().await.map_err(EventDeskError::Http)?;
        let link = created
            .get("htmlLink")
            .and_then(Value::as_str)
            .map(str::to_string);

        info!(
            event = %submission.event_name,
            calendar_id = %calendar_id,
            recurring = repeat_monthly,
            "Calendar event created"
        );
        Ok(link)
    }
}

/// Build the events API request body for a submission.
///
/// Submissions without a start time become all-day events spanning the
/// event date through the end date; the API treats the end date as
/// exclusive, so one day is added. Timed events run from the start time
/// on the event date to the end time on the effective end date, falling
/// back to the start time when no end time was given.
pub fn build_event(submission: &Submission, repeat_monthly: bool) -> Value {
    let mut event = json!({
        "summary": submission.event_name,
        "location": submission.location,
        "description": format_description(submission),
    });

    let (start, end) = match submission.start_time {
        None => {
            let end_date = submission
                .effective_end_date()
                .checked_add_days(Days::new(1))
                .unwrap_or(submission.event_date);
            (
                json!({ "date": submission.event_date.format("%Y-%m-%d").to_string() }),
                json!({ "date": end_date.format("%Y-%m-%d").to_string() }),
            )
        }
        Some(start_time) => {
            let end_time = submission.end_time.unwrap_or(start_time);
            (
                json!({
                    "dateTime": format!(
                        "{}T{}",
                        submission.event_date.format("%Y-%m-%d"),
                        start_time.format("%H:%M:%S"),
                    ),
                    "timeZone": EVENT_TIME_ZONE,
                }),
                json!({
                    "dateTime": format!(
                        "{}T{}",
                        submission.effective_end_date().format("%Y-%m-%d"),
                        end_time.format("%H:%M:%S"),
                    ),
                    "timeZone": EVENT_TIME_ZONE,
                }),
            )
        }
    };
    event["start"] = start;
    event["end"] = end;

    if repeat_monthly {
        let byday = monthly_byday(submission.event_date);
        let rule = format!("RRULE:FREQ=MONTHLY;{}", byday.trim_end_matches(';'));
        event["recurrence"] = json!([rule]);
    }

    event
}
