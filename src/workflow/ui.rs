//! Display seam for the review workflow
//!
//! The controller never prints or prompts directly; it goes through
//! [`ReviewUi`]. The console implementation uses `inquire` prompts, and
//! integration tests substitute a scripted implementation.

use chrono::{NaiveDate, NaiveTime};
use inquire::{Confirm, Select, Text};

use crate::models::Submission;
use crate::review::ValidationReport;
use crate::utils::errors::{EventDeskError, Result};

/// Reviewer's choice on the queue screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueChoice {
    /// Open the queue entry at this index for editing
    Open(usize),
    /// Drop the cache and reload the queue
    Refresh,
    /// End the session
    Quit,
}

/// Reviewer's choice on the editor screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    /// Draft was edited; render the editor again so validation reruns
    Stay,
    /// Mark the submission ignored
    Ignore,
    /// Push the submission to the calendar
    AddToCalendar { repeat_monthly: bool },
    /// Return to the queue without writing anything
    Back,
    /// Drop the cache and return to a freshly loaded queue
    Refresh,
}

/// Everything the workflow needs from a display layer
pub trait ReviewUi {
    fn info(&mut self, message: &str);
    fn warning(&mut self, message: &str);
    fn error(&mut self, message: &str);

    /// Present the pending queue and return the reviewer's choice
    fn select_submission(&mut self, queue: &[Submission]) -> Result<QueueChoice>;

    /// Present the draft with its validation report, let the reviewer
    /// edit fields, and return the action they settle on. When the
    /// report has errors, Ignore and AddToCalendar must not be offered.
    /// Warnings reach the reviewer through [`ReviewUi::warning`] before
    /// each render; this method only gates on errors.
    fn edit_draft(
        &mut self,
        draft: &mut Submission,
        report: &ValidationReport,
    ) -> Result<EditorAction>;
}

/// Terminal implementation over `inquire` prompts
pub struct ConsoleUi;

const QUEUE_REFRESH: &str = "Refresh queue";
const QUEUE_QUIT: &str = "Quit";

const ACTION_EDIT: &str = "Edit a field";
const ACTION_IGNORE: &str = "Ignore submission";
const ACTION_ADD: &str = "Add to calendar";
const ACTION_ADD_MONTHLY: &str = "Add to calendar (repeats monthly)";
const ACTION_BACK: &str = "Back to queue";
const ACTION_REFRESH: &str = "Refresh queue";

impl ConsoleUi {
    pub fn new() -> Self {
        Self
    }

    fn prompt_field(&self, draft: &mut Submission) -> Result<()> {
        let fields = vec![
            "Event Name",
            "Description",
            "Event Date",
            "End Date",
            "Start Time",
            "End Time",
            "Location",
            "Event Type",
            "Organization Name",
            "Contact Phone Number",
            "Fee",
            "Email Address",
        ];
        let field = Select::new("Which field?", fields)
            .prompt()
            .map_err(console_err)?;

        match field {
            "Event Name" => draft.event_name = self.prompt_text(field, &draft.event_name)?,
            "Description" => draft.description = self.prompt_text(field, &draft.description)?,
            "Event Date" => draft.event_date = self.prompt_date(field, Some(draft.event_date))?,
            "End Date" => draft.end_date = self.prompt_optional_date(field, draft.end_date)?,
            "Start Time" => draft.start_time = self.prompt_optional_time(field, draft.start_time)?,
            "End Time" => draft.end_time = self.prompt_optional_time(field, draft.end_time)?,
            "Location" => draft.location = self.prompt_text(field, &draft.location)?,
            "Event Type" => draft.event_type = self.prompt_text(field, &draft.event_type)?,
            "Organization Name" => {
                draft.organization = self.prompt_text(field, &draft.organization)?
            }
            "Contact Phone Number" => draft.phone = self.prompt_text(field, &draft.phone)?,
            "Fee" => draft.fee = self.prompt_text(field, &draft.fee)?,
            "Email Address" => draft.email = self.prompt_text(field, &draft.email)?,
            _ => {}
        }
        Ok(())
    }

    fn prompt_text(&self, field: &str, current: &str) -> Result<String> {
        Text::new(&format!("{field}:"))
            .with_initial_value(current)
            .prompt()
            .map_err(console_err)
    }

    fn prompt_date(&self, field: &str, current: Option<NaiveDate>) -> Result<NaiveDate> {
        loop {
            let initial = current
                .map(|d| d.format("%m/%d/%Y").to_string())
                .unwrap_or_default();
            let raw = self.prompt_text(field, &initial)?;
            match parse_date(&raw) {
                Some(date) => return Ok(date),
                None => println!("'{raw}' is not a valid date; use MM/DD/YYYY."),
            }
        }
    }

    fn prompt_optional_date(
        &self,
        field: &str,
        current: Option<NaiveDate>,
    ) -> Result<Option<NaiveDate>> {
        let initial = current
            .map(|d| d.format("%m/%d/%Y").to_string())
            .unwrap_or_default();
        loop {
            let raw = self.prompt_text(field, &initial)?;
            if raw.trim().is_empty() {
                return Ok(None);
            }
            match parse_date(&raw) {
                Some(date) => return Ok(Some(date)),
                None => println!("'{raw}' is not a valid date; use MM/DD/YYYY or leave blank."),
            }
        }
    }

    fn prompt_optional_time(
        &self,
        field: &str,
        current: Option<NaiveTime>,
    ) -> Result<Option<NaiveTime>> {
        let initial = current
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_default();
        loop {
            let raw = self.prompt_text(field, &initial)?;
            if raw.trim().is_empty() {
                return Ok(None);
            }
            match parse_time(&raw) {
                Some(time) => return Ok(Some(time)),
                None => println!("'{raw}' is not a valid time; use HH:MM or leave blank."),
            }
        }
    }
}

impl Default for ConsoleUi {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewUi for ConsoleUi {
    fn info(&mut self, message: &str) {
        println!("{message}");
    }

    fn warning(&mut self, message: &str) {
        println!("warning: {message}");
    }

    fn error(&mut self, message: &str) {
        eprintln!("error: {message}");
    }

    fn select_submission(&mut self, queue: &[Submission]) -> Result<QueueChoice> {
        if queue.is_empty() {
            println!("No pending submissions.");
        }
        let mut options: Vec<String> = queue.iter().map(queue_label).collect();
        options.push(QUEUE_REFRESH.to_string());
        options.push(QUEUE_QUIT.to_string());

        let chosen = Select::new("Pending submissions", options)
            .prompt()
            .map_err(console_err)?;
        if chosen == QUEUE_REFRESH {
            return Ok(QueueChoice::Refresh);
        }
        if chosen == QUEUE_QUIT {
            return Ok(QueueChoice::Quit);
        }
        let index = queue
            .iter()
            .position(|s| queue_label(s) == chosen)
            .ok_or_else(|| EventDeskError::Console("Selected row no longer listed".to_string()))?;
        Ok(QueueChoice::Open(index))
    }

    fn edit_draft(
        &mut self,
        draft: &mut Submission,
        report: &ValidationReport,
    ) -> Result<EditorAction> {
        print_draft(draft);
        for error in &report.errors {
            println!("invalid: {error}");
        }

        let mut options = vec![ACTION_EDIT];
        if report.is_valid() {
            options.push(ACTION_IGNORE);
            options.push(ACTION_ADD);
            options.push(ACTION_ADD_MONTHLY);
        }
        options.push(ACTION_BACK);
        options.push(ACTION_REFRESH);

        let chosen = Select::new("Action", options).prompt().map_err(console_err)?;
        match chosen {
            ACTION_EDIT => {
                self.prompt_field(draft)?;
                Ok(EditorAction::Stay)
            }
            ACTION_IGNORE => {
                let sure = Confirm::new("Mark this submission as ignored?")
                    .with_default(false)
                    .prompt()
                    .map_err(console_err)?;
                if sure {
                    Ok(EditorAction::Ignore)
                } else {
                    Ok(EditorAction::Stay)
                }
            }
            ACTION_ADD => Ok(EditorAction::AddToCalendar {
                repeat_monthly: false,
            }),
            ACTION_ADD_MONTHLY => Ok(EditorAction::AddToCalendar {
                repeat_monthly: true,
            }),
            ACTION_REFRESH => Ok(EditorAction::Refresh),
            _ => Ok(EditorAction::Back),
        }
    }
}

fn console_err(err: inquire::InquireError) -> EventDeskError {
    EventDeskError::Console(err.to_string())
}

fn queue_label(submission: &Submission) -> String {
    format!(
        "#{} {} {}",
        submission.row_index + 2,
        submission.event_date.format("%m/%d/%Y"),
        submission.event_name,
    )
}

fn print_draft(draft: &Submission) {
    println!();
    println!("Event Name:   {}", draft.event_name);
    println!("Event Date:   {}", draft.event_date.format("%m/%d/%Y"));
    if let Some(end_date) = draft.end_date {
        println!("End Date:     {}", end_date.format("%m/%d/%Y"));
    }
    if let Some(start_time) = draft.start_time {
        println!("Start Time:   {}", start_time.format("%H:%M"));
    }
    if let Some(end_time) = draft.end_time {
        println!("End Time:     {}", end_time.format("%H:%M"));
    }
    println!("Location:     {}", draft.location);
    println!("Event Type:   {}", draft.event_type);
    println!("Organization: {}", draft.organization);
    println!("Phone:        {}", draft.phone);
    println!("Fee:          {}", draft.fee);
    println!("Email:        {}", draft.email);
    println!("Description:  {}", draft.description);
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%m/%d/%Y")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    ["%H:%M", "%H:%M:%S", "%I:%M %p"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
}
