//! # stellar-notify
//!
//! Notification sinks for the Stellar Health client.
//!
//! ## Overview
//!
//! Controllers hand every notification to a `NotificationSink`. This crate
//! provides the reference sinks:
//!
//! - `InMemoryNotifier`: append-only, sequence-numbered history
//! - `TracingNotifier` : structured log lines
//! - `FanoutNotifier`  : several sinks at once
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stellar_notify::{FanoutNotifier, InMemoryNotifier, TracingNotifier};
//!
//! let history = Arc::new(InMemoryNotifier::new("query-view"));
//! let sink = FanoutNotifier::new()
//!     .with(history.clone())
//!     .with(Arc::new(TracingNotifier));
//! ```

pub mod event;
pub mod memory;
pub mod sinks;

pub use event::{NotificationLog, NotificationRecord};
pub use memory::InMemoryNotifier;
pub use sinks::{FanoutNotifier, TracingNotifier};

// ── Tests ─────────────────────────────────────────────────────────────────────
