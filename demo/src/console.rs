//! Terminal output: toasts as they happen, outcomes as they resolve.

use serde_json::{json, Value};

use stellar_contracts::{
    error::SubmitError,
    event::Reaction,
    notification::Notification,
    outcome::RequestOutcome,
};
use stellar_core::traits::NotificationSink;
use stellar_notify::NotificationLog;

/// Prints each notification the moment it is issued.
pub struct ConsoleNotifier;

impl NotificationSink for ConsoleNotifier {
    fn notify(&self, notification: &Notification) {
        let marker = if notification.is_destructive() { "!" } else { "*" };
        println!(
            "  [{}] {}: {}",
            marker, notification.title, notification.description
        );
    }
}

/// Collects step results; prints them as it goes, or as one JSON document
/// at the end with `--json`.
pub struct Report {
    json: bool,
    steps: Vec<Value>,
}

impl Report {
    pub fn new(json: bool) -> Self {
        Self {
            json,
            steps: Vec::new(),
        }
    }

    pub fn step(&self, label: &str) {
        if !self.json {
            println!();
            println!("> {}", label);
        }
    }

    pub fn submission(&mut self, label: &str, result: &Result<RequestOutcome, SubmitError>) {
        match result {
            Ok(outcome) => {
                if !self.json {
                    println!("  phase: {}", outcome.status.phase());
                    if let Some(payload) = &outcome.payload {
                        println!();
                        for line in payload.lines() {
                            println!("    {}", line);
                        }
                    }
                }
                self.steps.push(json!({ "step": label, "outcome": outcome }));
            }
            Err(err) => {
                if !self.json {
                    println!("  not submitted: {}", err);
                }
                self.steps
                    .push(json!({ "step": label, "rejected": err.to_string() }));
            }
        }
    }

    pub fn reaction(&mut self, label: &str, reaction: &Reaction) {
        let text = match reaction {
            Reaction::Staged { name } => format!("staged {}", name),
            Reaction::Rejected(err) => format!("rejected: {}", err),
            other => format!("{:?}", other),
        };
        if !self.json {
            println!("  {}", text);
        }
        self.steps.push(json!({ "step": label, "reaction": text }));
    }

    pub fn note(&self, text: &str) {
        if !self.json {
            println!("  {}", text);
        }
    }

    pub fn finish(self, log: &NotificationLog) {
        if self.json {
            let doc = json!({ "steps": self.steps, "notifications": log });
            println!("{:#}", doc);
        } else {
            println!();
            println!(
                "{} notification(s) issued, {} destructive.",
                log.records.len(),
                log.destructive_count()
            );
        }
    }
}
