//! Forwarding sinks: structured logs and fan-out.

use std::sync::Arc;

use tracing::{info, warn};

use stellar_contracts::notification::Notification;
use stellar_core::traits::NotificationSink;

/// Writes each notification to `tracing`.
///
/// Destructive notifications are logged at `warn`, the rest at `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        if notification.is_destructive() {
            warn!(
                title = %notification.title,
                description = %notification.description,
                "notification"
            );
        } else {
            info!(
                title = %notification.title,
                description = %notification.description,
                "notification"
            );
        }
    }
}

/// Delivers every notification to each inner sink, in registration order.
#[derive(Default, Clone)]
pub struct FanoutNotifier {
    sinks: Vec<Arc<dyn NotificationSink>>,
}

impl FanoutNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sinks.push(sink);
        self
    }
}

impl NotificationSink for FanoutNotifier {
    fn notify(&self, notification: &Notification) {
        for sink in &self.sinks {
            sink.notify(notification);
        }
    }
}
