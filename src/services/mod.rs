//! External service integrations
//!
//! Google authentication, Sheets data access, Calendar event creation,
//! reviewer authorization, and the shared read cache. `ServiceFactory`
//! wires them together from settings.

pub mod auth;
pub mod cache;
pub mod calendar;
pub mod google_auth;
pub mod sheets;

pub use auth::{AuthService, ConfigSession, SessionProvider};
pub use cache::SheetCache;
pub use calendar::CalendarService;
pub use google_auth::{GoogleAuthService, ServiceAccountKey};
pub use sheets::SheetsService;

use std::time::Duration;

use tracing::info;

use crate::config::Settings;
use crate::utils::errors::Result;

/// Creates and holds the service instances the workflow depends on
#[derive(Clone)]
pub struct ServiceFactory {
    sheets: SheetsService,
    calendar: CalendarService,
    auth: AuthService,
}

impl ServiceFactory {
    /// Build the full service graph: load the service-account key, share
    /// one token source between Sheets and Calendar, and size the read
    /// cache from the configured TTL.
    pub fn new(settings: &Settings) -> Result<Self> {
        let key = ServiceAccountKey::from_file(&settings.google.service_account_path)?;
        let google_auth = GoogleAuthService::new(key)?;

        let cache = SheetCache::new(Duration::from_secs(settings.review.cache_ttl_seconds));
        let sheets = SheetsService::new(google_auth.clone(), cache, settings.clone())?;
        let calendar = CalendarService::new(google_auth, settings.clone())?;
        let auth = AuthService::new(sheets.clone());

        info!("Service factory initialized");
        Ok(Self {
            sheets,
            calendar,
            auth,
        })
    }

    pub fn sheets(&self) -> &SheetsService {
        &self.sheets
    }

    pub fn calendar(&self) -> &CalendarService {
        &self.calendar
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }
}
