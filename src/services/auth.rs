//! Reviewer authorization
//!
//! Identifies who is operating the desk and checks that identity against
//! the authorized-users worksheet before any review action is allowed.

use tracing::{info, warn};

use crate::config::SessionConfig;
use crate::models::UserIdentity;
use crate::services::sheets::SheetsService;
use crate::utils::errors::{EventDeskError, Result};

/// Source of the acting reviewer's identity.
///
/// The production implementation reads the configured session; tests
/// substitute fixed identities.
pub trait SessionProvider: Send + Sync {
    fn current_user(&self) -> Result<UserIdentity>;
}

/// Identity taken from the `[session]` configuration section
pub struct ConfigSession {
    config: SessionConfig,
}

impl ConfigSession {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }
}

impl SessionProvider for ConfigSession {
    fn current_user(&self) -> Result<UserIdentity> {
        let name = self
            .config
            .reviewer_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                EventDeskError::Config(
                    "No reviewer name configured; set EVENTDESK__SESSION__REVIEWER_NAME"
                        .to_string(),
                )
            })?;
        let email = self
            .config
            .reviewer_email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .ok_or_else(|| {
                EventDeskError::Config(
                    "No reviewer email configured; set EVENTDESK__SESSION__REVIEWER_EMAIL"
                        .to_string(),
                )
            })?;
        Ok(UserIdentity::new(name, email))
    }
}

/// Gate on the authorized-users worksheet
#[derive(Clone)]
pub struct AuthService {
    sheets: SheetsService,
}

impl AuthService {
    pub fn new(sheets: SheetsService) -> Self {
        Self { sheets }
    }

    /// Check `identity` against the authorized-users list, returning
    /// `PermissionDenied` when the email is not listed.
    pub async fn authorize(&self, identity: &UserIdentity) -> Result<()> {
        let users = self.sheets.list_authorized_users().await?;
        if users.contains(&identity.email) {
            info!(reviewer = %identity.email, "Reviewer authorized");
            Ok(())
        } else {
            warn!(reviewer = %identity.email, "Authorization rejected");
            Err(EventDeskError::PermissionDenied(format!(
                "{} is not listed in the authorized users sheet",
                identity.email
            )))
        }
    }
}
