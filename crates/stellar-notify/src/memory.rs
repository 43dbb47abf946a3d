//! In-memory implementation of `NotificationSink`.
//!
//! `InMemoryNotifier` keeps every notification in a `Vec` behind a `Mutex`,
//! so the same sink can be shared by a controller and whoever renders the
//! toasts. Use `export_log()` to read the history.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use stellar_contracts::notification::Notification;
use stellar_core::traits::NotificationSink;

use crate::event::{NotificationLog, NotificationRecord};

// ── Internal mutable state ────────────────────────────────────────────────────

pub(crate) struct InMemoryState {
    /// All records received so far, in append order.
    pub(crate) records: Vec<NotificationRecord>,

    /// The next sequence number to assign (starts at 0).
    pub(crate) sequence: u64,
}

// ── Public sink ───────────────────────────────────────────────────────────────

/// An append-only, in-memory notification sink.
pub struct InMemoryNotifier {
    surface: String,
    pub(crate) state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryNotifier {
    pub fn new(surface: impl Into<String>) -> Self {
        Self {
            surface: surface.into(),
            state: Arc::new(Mutex::new(InMemoryState {
                records: Vec::new(),
                sequence: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, InMemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Export every record received so far.
    pub fn export_log(&self) -> NotificationLog {
        let state = self.lock();
        NotificationLog {
            surface: self.surface.clone(),
            records: state.records.clone(),
            exported_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The most recent notification, if any.
    pub fn last(&self) -> Option<Notification> {
        self.lock().records.last().map(|r| r.notification.clone())
    }
}

// ── NotificationSink impl ─────────────────────────────────────────────────────

impl NotificationSink for InMemoryNotifier {
    fn notify(&self, notification: &Notification) {
        let mut state = self.lock();
        let sequence = state.sequence;
        state.records.push(NotificationRecord {
            sequence,
            surface: self.surface.clone(),
            notification: notification.clone(),
        });
        state.sequence += 1;
    }
}
