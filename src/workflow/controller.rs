//! Review workflow controller
//!
//! Drives one reviewer session: establish identity, authorize against
//! the users sheet, then loop between the queue and the editor. All
//! interaction goes through the [`ReviewUi`] seam; all state movement
//! goes through the session state machine.

use tracing::{info, warn};

use crate::models::{Submission, SubmissionStatus, UserIdentity};
use crate::review::validate;
use crate::services::ServiceFactory;
use crate::utils::errors::{EventDeskError, Result};
use crate::utils::logging::log_review_action;
use crate::workflow::state::{ReviewState, SessionStateMachine};
use crate::workflow::ui::{EditorAction, QueueChoice, ReviewUi};

/// Outcome of one editor pass, used to decide the next queue load
enum EditorExit {
    ToQueue,
    RefreshQueue,
}

pub struct ReviewController {
    services: ServiceFactory,
    machine: SessionStateMachine,
}

impl ReviewController {
    pub fn new(services: ServiceFactory) -> Self {
        Self {
            services,
            machine: SessionStateMachine::new(),
        }
    }

    pub fn state(&self) -> ReviewState {
        self.machine.state()
    }

    /// Run a full session for `identity`. Returns Ok when the reviewer
    /// quits or is rejected; hard failures (config, transport) bubble up.
    pub async fn run(
        &mut self,
        identity: &UserIdentity,
        ui: &mut dyn ReviewUi,
    ) -> Result<()> {
        self.machine.transition(ReviewState::Authenticating)?;
        if identity.email.trim().is_empty() {
            self.machine.transition(ReviewState::Unauthenticated)?;
            return Err(EventDeskError::Authentication(
                "Reviewer identity has no email".to_string(),
            ));
        }
        self.machine.transition(ReviewState::Authenticated)?;

        match self.services.auth().authorize(identity).await {
            Ok(()) => self.machine.transition(ReviewState::Authorized)?,
            Err(EventDeskError::PermissionDenied(reason)) => {
                self.machine.transition(ReviewState::Rejected)?;
                ui.error(&format!("You are not authorized to review events: {reason}"));
                return Ok(());
            }
            Err(other) => return Err(other),
        }

        ui.info(&format!("Signed in as {} <{}>", identity.name, identity.email));
        self.services.sheets().ensure_status_columns().await?;

        loop {
            self.machine.transition(ReviewState::Reviewing)?;
            let queue = self.services.sheets().list_submissions().await?;

            match ui.select_submission(&queue)? {
                QueueChoice::Quit => {
                    info!(reviewer = %identity.email, "Review session ended");
                    return Ok(());
                }
                QueueChoice::Refresh => {
                    self.services.sheets().cache().invalidate_all();
                }
                QueueChoice::Open(index) => {
                    let Some(selected) = queue.get(index) else {
                        ui.error("That submission is no longer in the queue.");
                        continue;
                    };
                    self.machine.transition(ReviewState::Editing)?;
                    match self.edit(selected.clone(), identity, ui).await? {
                        EditorExit::ToQueue => {}
                        EditorExit::RefreshQueue => {
                            self.services.sheets().cache().invalidate_all();
                        }
                    }
                }
            }
        }
    }

    /// The editor loop over a draft copy of one submission. The source
    /// row is untouched until a status write commits a decision.
    async fn edit(
        &mut self,
        mut draft: Submission,
        identity: &UserIdentity,
        ui: &mut dyn ReviewUi,
    ) -> Result<EditorExit> {
        loop {
            let report = validate(&draft);
            for warning in &report.warnings {
                ui.warning(warning);
            }
            let action = ui.edit_draft(&mut draft, &report)?;

            match action {
                EditorAction::Stay => {
                    self.machine.transition(ReviewState::Editing)?;
                }
                EditorAction::Back => return Ok(EditorExit::ToQueue),
                EditorAction::Refresh => return Ok(EditorExit::RefreshQueue),
                EditorAction::Ignore => {
                    if !report.is_valid() {
                        ui.error("Fix the validation errors before acting on this submission.");
                        continue;
                    }
                    self.services
                        .sheets()
                        .update_status(draft.row_index, SubmissionStatus::Ignored, identity)
                        .await?;
                    log_review_action(&identity.name, "ignore", Some(&draft.event_name));
                    ui.info(&format!("'{}' marked as ignored.", draft.event_name));
                    return Ok(EditorExit::ToQueue);
                }
                EditorAction::AddToCalendar { repeat_monthly } => {
                    if !report.is_valid() {
                        ui.error("Fix the validation errors before acting on this submission.");
                        continue;
                    }
                    match self.services.calendar().add_event(&draft, repeat_monthly).await {
                        Ok(link) => {
                            self.services
                                .sheets()
                                .update_status(
                                    draft.row_index,
                                    SubmissionStatus::AddedToCalendar,
                                    identity,
                                )
                                .await?;
                            log_review_action(
                                &identity.name,
                                "add_to_calendar",
                                Some(&draft.event_name),
                            );
                            match link {
                                Some(link) => ui.info(&format!(
                                    "'{}' added to the calendar: {link}",
                                    draft.event_name
                                )),
                                None => ui
                                    .info(&format!("'{}' added to the calendar.", draft.event_name)),
                            }
                            return Ok(EditorExit::ToQueue);
                        }
                        Err(err) => {
                            // No status write on failure; the row stays
                            // pending and the draft stays editable.
                            warn!(error = %err, "Calendar insert failed");
                            ui.error(&format!("Could not create the event: {err}"));
                            self.machine.transition(ReviewState::Editing)?;
                        }
                    }
                }
            }
        }
    }
}
