//! Read-through cache for spreadsheet data
//!
//! Successful sheet reads are memoized for a fixed window so every render
//! of the review queue does not hit the Sheets API. Any write clears the
//! whole cache; there is no fine-grained invalidation.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use crate::models::Submission;

/// Process-wide TTL cache for the two sheet-backed datasets, keyed by
/// spreadsheet id
#[derive(Clone)]
pub struct SheetCache {
    submissions: Cache<String, Arc<Vec<Submission>>>,
    users: Cache<String, Arc<HashSet<String>>>,
}

impl SheetCache {
    /// Create a cache whose entries live for `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            submissions: Cache::builder().max_capacity(64).time_to_live(ttl).build(),
            users: Cache::builder().max_capacity(64).time_to_live(ttl).build(),
        }
    }

    pub async fn get_submissions(&self, spreadsheet_id: &str) -> Option<Arc<Vec<Submission>>> {
        let hit = self.submissions.get(spreadsheet_id).await;
        debug!(
            spreadsheet_id = spreadsheet_id,
            hit = hit.is_some(),
            "Submission cache lookup"
        );
        hit
    }

    pub async fn put_submissions(&self, spreadsheet_id: &str, rows: Vec<Submission>) {
        self.submissions
            .insert(spreadsheet_id.to_string(), Arc::new(rows))
            .await;
    }

    pub async fn get_users(&self, spreadsheet_id: &str) -> Option<Arc<HashSet<String>>> {
        self.users.get(spreadsheet_id).await
    }

    pub async fn put_users(&self, spreadsheet_id: &str, users: HashSet<String>) {
        self.users
            .insert(spreadsheet_id.to_string(), Arc::new(users))
            .await;
    }

    /// Drop every cached entry. Called after any write so the next read
    /// observes the store, and on explicit refresh.
    pub fn invalidate_all(&self) {
        self.submissions.invalidate_all();
        self.users.invalidate_all();
        debug!("Sheet cache invalidated");
    }
}
