//! # stellar-core
//!
//! The UI-agnostic request lifecycle for the Stellar Health client.
//!
//! This crate provides:
//! - The collaborator traits (`QueryBackend`, `IngestBackend`, `NotificationSink`)
//! - Input validation and the demo-mode fallback generators
//! - The generic `RequestLifecycle` controller and its two instantiations,
//!   `QueryController` and `IngestController`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stellar_core::{QueryController, traits::{QueryBackend, NotificationSink}};
//!
//! let ctrl = QueryController::new(backend, notifier, &config);
//! let outcome = ctrl.submit("elevated heart rate during EVA").await?;
//! ```

pub mod fallback;
pub mod ingest;
pub mod lifecycle;
pub mod query;
pub mod selection;
pub mod traits;
pub mod validate;

pub use ingest::IngestController;
pub use lifecycle::{RequestLifecycle, Workflow, WorkflowSnapshot};
pub use query::QueryController;
