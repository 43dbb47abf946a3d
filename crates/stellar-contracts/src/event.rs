//! Event objects a UI binding feeds into a controller, and the controller's
//! reaction to each.
//!
//! Any front end (CLI, TUI, web bridge) translates its own input callbacks
//! into these values, so the controller logic never sees a UI framework.

use crate::{error::ValidationError, outcome::RequestOutcome, request::UploadCandidate};

/// Where a file selection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSource {
    Picker,
    Drop,
}

/// Input events for the query workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryEvent {
    /// The user pressed submit with this text in the box.
    Submit { text: String },
}

/// Input events for the ingestion workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestEvent {
    /// A drag is hovering over the drop zone.
    DragOver,
    /// The picker changed; `None` when the dialog was dismissed.
    FilePicked(Option<UploadCandidate>),
    /// Something was dropped; `None` when the drop carried no file.
    FileDropped(Option<UploadCandidate>),
    /// The user pressed upload.
    Submit,
    /// The user pressed cancel.
    Cancel,
}

/// What a controller did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    /// Drag-over accepted without validation.
    DragAccepted,
    /// A file passed validation and is now staged.
    Staged { name: String },
    /// Nothing happened (dismissed picker, event not valid in this phase).
    Ignored,
    /// Validation failed; a destructive notification was issued.
    Rejected(ValidationError),
    /// The staged file and any stale outcome were discarded.
    Cancelled,
    /// A submission reached a terminal outcome.
    Resolved(RequestOutcome),
    /// A submission is already in flight.
    Busy,
}
