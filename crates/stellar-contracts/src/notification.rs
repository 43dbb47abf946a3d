//! User-facing notifications (toasts).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Default,
    Destructive,
}

/// A titled message handed to the notification surface.
///
/// Immutable once issued; the surface decides how long to show it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub issued_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
            issued_at: Utc::now(),
        }
    }

    /// A `Default`-severity notification.
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Default)
    }

    /// A `Destructive`-severity notification.
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Destructive)
    }

    pub fn is_destructive(&self) -> bool {
        self.severity == Severity::Destructive
    }
}
