//! Google Sheets data access layer
//!
//! Wraps the Sheets values API for the two worksheets the review desk
//! reads (form responses, authorized users) and the status write-back.
//! Successful reads are memoized through [`SheetCache`]; every write
//! invalidates the whole cache so the next render observes the store.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::config::Settings;
use crate::models::{columns, Submission, SubmissionStatus, UserIdentity, EXPECTED_COLUMNS};
use crate::services::cache::SheetCache;
use crate::services::google_auth::GoogleAuthService;
use crate::utils::errors::{EventDeskError, Result, SheetsError};
use crate::utils::logging::log_api_error;

/// Sheets values API response for a range read
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// Data access service over the configured spreadsheet
#[derive(Clone)]
pub struct SheetsService {
    client: reqwest::Client,
    auth: GoogleAuthService,
    cache: SheetCache,
    settings: Settings,
}

impl SheetsService {
    pub fn new(auth: GoogleAuthService, cache: SheetCache, settings: Settings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("EventDesk/1.0")
            .build()
            .map_err(EventDeskError::Http)?;

        Ok(Self {
            client,
            auth,
            cache,
            settings,
        })
    }

    /// The cache shared with the workflow's explicit refresh action
    pub fn cache(&self) -> &SheetCache {
        &self.cache
    }

    /// List submissions still awaiting review, in sheet order.
    ///
    /// Rows whose status is terminal (Ignored, Added to Calendar) are
    /// excluded. Served from cache within the TTL window.
    pub async fn list_submissions(&self) -> Result<Vec<Submission>> {
        let spreadsheet_id = &self.settings.google.spreadsheet_id;
        if let Some(cached) = self.cache.get_submissions(spreadsheet_id).await {
            return Ok(cached.as_ref().clone());
        }

        let worksheet = &self.settings.review.responses_worksheet;
        let rows = self.fetch_values(worksheet).await?;
        let mut rows = rows.into_iter();

        let header = match rows.next() {
            Some(header_row) => header_map(&header_row),
            None => {
                return Err(
                    SheetsError::MissingColumns(to_owned_names(EXPECTED_COLUMNS)).into(),
                )
            }
        };

        let missing: Vec<String> = EXPECTED_COLUMNS
            .iter()
            .filter(|name| !header.contains_key(**name))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(SheetsError::MissingColumns(missing).into());
        }

        let mut submissions = Vec::new();
        for (row_index, cells) in rows.enumerate() {
            let submission = Submission::from_row(row_index, &header, &cells)?;
            if !submission.status.is_terminal() {
                submissions.push(submission);
            }
        }

        info!(
            count = submissions.len(),
            worksheet = %worksheet,
            "Loaded pending submissions"
        );
        self.cache
            .put_submissions(spreadsheet_id, submissions.clone())
            .await;
        Ok(submissions)
    }

    /// Load the set of reviewer emails allowed to operate the desk
    pub async fn list_authorized_users(&self) -> Result<HashSet<String>> {
        let spreadsheet_id = &self.settings.google.spreadsheet_id;
        if let Some(cached) = self.cache.get_users(spreadsheet_id).await {
            return Ok(cached.as_ref().clone());
        }

        let worksheet = &self.settings.review.users_worksheet;
        let rows = self.fetch_values(worksheet).await?;
        let mut rows = rows.into_iter();

        let header = rows
            .next()
            .map(|header_row| header_map(&header_row))
            .unwrap_or_default();
        let email_col = *header
            .get("Email")
            .ok_or_else(|| SheetsError::MissingColumns(vec!["Email".to_string()]))?;

        let users: HashSet<String> = rows
            .filter_map(|cells| cells.get(email_col).map(|email| email.trim().to_string()))
            .filter(|email| !email.is_empty())
            .collect();

        debug!(count = users.len(), "Loaded authorized users");
        self.cache.put_users(spreadsheet_id, users.clone()).await;
        Ok(users)
    }

    /// Write the review status and acting identity for one data row.
    ///
    /// `row_index` is the 0-based data row; the sheet row is offset by 2
    /// for the header and 1-based numbering. The whole cache is
    /// invalidated so a follow-up read never serves the pre-update row.
    pub async fn update_status(
        &self,
        row_index: usize,
        status: SubmissionStatus,
        actor: &UserIdentity,
    ) -> Result<()> {
        let worksheet = self.settings.review.responses_worksheet.clone();
        let header_cells = self.fetch_header(&worksheet).await?;

        let find = |name: &str| -> Result<usize> {
            header_cells
                .iter()
                .position(|cell| cell == name)
                .ok_or_else(|| SheetsError::MissingColumns(vec![name.to_string()]).into())
        };
        let status_col = find(columns::STATUS)?;
        let actor_col = find(columns::LAST_UPDATED_BY)?;

        let sheet_row = row_index + 2;
        self.update_cell(&worksheet, sheet_row, status_col, status.as_str())
            .await?;
        self.update_cell(&worksheet, sheet_row, actor_col, &actor.name)
            .await?;

        self.cache.invalidate_all();
        info!(
            row = sheet_row,
            status = %status,
            actor = %actor.name,
            "Submission status updated"
        );
        Ok(())
    }

    /// Make sure the Status / Last Updated By columns exist, appending
    /// whichever are missing. No-op when both are present.
    pub async fn ensure_status_columns(&self) -> Result<()> {
        let worksheet = self.settings.review.responses_worksheet.clone();
        let header_cells = self.fetch_header(&worksheet).await?;

        let missing: Vec<&str> = [columns::STATUS, columns::LAST_UPDATED_BY]
            .into_iter()
            .filter(|name| !header_cells.iter().any(|cell| cell == name))
            .collect();
        if missing.is_empty() {
            return Ok(());
        }

        for (offset, name) in missing.iter().enumerate() {
            let col = header_cells.len() + offset;
            self.update_cell(&worksheet, 1, col, name).await?;
            info!(column = name, "Added status column to the spreadsheet");
        }

        self.cache.invalidate_all();
        Ok(())
    }

    /// Read the header row of a worksheet, uncached
    async fn fetch_header(&self, worksheet: &str) -> Result<Vec<String>> {
        let range = format!("{worksheet}!1:1");
        let rows = self.fetch_range(worksheet, &range).await?;
        Ok(rows.into_iter().next().unwrap_or_default())
    }

    /// Read all values of a worksheet
    async fn fetch_values(&self, worksheet: &str) -> Result<Vec<Vec<String>>> {
        self.fetch_range(worksheet, worksheet).await
    }

    async fn fetch_range(&self, worksheet: &str, range: &str) -> Result<Vec<Vec<String>>> {
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.settings.google.sheets_api_url,
            urlencoding::encode(&self.settings.google.spreadsheet_id),
            urlencoding::encode(range),
        );
        let token = self.auth.access_token().await?;

        debug!(url = %url, "Reading sheet range");
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(EventDeskError::Http)?;

        if !response.status().is_success() {
            return Err(self.map_error_response(response, worksheet).await.into());
        }

        let value_range: ValueRange = response.json().await.map_err(EventDeskError::Http)?;
        Ok(value_range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    /// Write a single cell. `sheet_row` is 1-based, `col` 0-based.
    async fn update_cell(
        &self,
        worksheet: &str,
        sheet_row: usize,
        col: usize,
        value: &str,
    ) -> Result<()> {
        let range = format!("{worksheet}!{}{}", column_letter(col), sheet_row);
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}?valueInputOption=RAW",
            self.settings.google.sheets_api_url,
            urlencoding::encode(&self.settings.google.spreadsheet_id),
            urlencoding::encode(&range),
        );
        let token = self.auth.access_token().await?;

        debug!(range = %range, value = value, "Writing sheet cell");
        let response = self
            .client
            .put(&url)
            .bearer_auth(token)
            .json(&json!({ "values": [[value]] }))
            .send()
            .await
            .map_err(EventDeskError::Http)?;

        if !response.status().is_success() {
            return Err(self.map_error_response(response, worksheet).await.into());
        }
        Ok(())
    }

    /// Translate an error response into the failure taxonomy: 404 means
    /// the spreadsheet id is wrong, 400 means the range (and therefore
    /// the worksheet name) could not be resolved.
    async fn map_error_response(
        &self,
        response: reqwest::Response,
        worksheet: &str,
    ) -> SheetsError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        log_api_error("sheets", &format!("HTTP {status}: {body}"), Some(worksheet));

        match status.as_u16() {
            404 => SheetsError::SpreadsheetNotFound(self.settings.google.spreadsheet_id.clone()),
            400 => SheetsError::WorksheetNotFound(worksheet.to_string()),
            _ => SheetsError::RequestFailed(format!("HTTP {status}: {body}")),
        }
    }
}

fn header_map(header_row: &[String]) -> HashMap<String, usize> {
    header_row
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.trim().to_string(), idx))
        .collect()
}

fn to_owned_names(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn cell_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// A1-notation column letter for a 0-based column index
fn column_letter(mut col: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (col % 26) as u8);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}
