//! Notification record and log types.
//!
//! `NotificationRecord` is one entry in a sink's append-only history, with
//! its position in issue order. `NotificationLog` is the exported view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stellar_contracts::notification::Notification;

/// One notification as received by a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    /// Position in issue order, starting at 0.
    pub sequence: u64,

    /// The surface (view) that received it.
    pub surface: String,

    pub notification: Notification,
}

/// Everything a sink has received, in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationLog {
    pub surface: String,
    pub records: Vec<NotificationRecord>,
    pub exported_at: DateTime<Utc>,
}

impl NotificationLog {
    /// Titles in issue order.
    pub fn titles(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(|r| r.notification.title.as_str())
            .collect()
    }

    pub fn destructive_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.notification.is_destructive())
            .count()
    }
}
