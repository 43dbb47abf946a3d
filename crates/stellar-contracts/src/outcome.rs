//! Workflow phases and request outcomes.
//!
//! `WorkflowPhase` is what a UI binding observes (and disables the submit
//! control on). `RequestOutcome` is the record of one submission, owned by
//! the controller and overwritten by the next one.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which workflow a controller instance drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowKind {
    Query,
    Ingest,
}

impl fmt::Display for WorkflowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowKind::Query => write!(f, "query"),
            WorkflowKind::Ingest => write!(f, "ingest"),
        }
    }
}

/// Observable phase of a workflow instance.
///
/// `Idle` is both the initial phase and the one re-entered when the user
/// starts a new interaction. The last three are terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
    FallbackSucceeded,
}

impl WorkflowPhase {
    /// True for any phase no transition leaves without a new user action.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            WorkflowPhase::Succeeded | WorkflowPhase::Failed | WorkflowPhase::FallbackSucceeded
        )
    }

    /// Whether the submit control must be disabled.
    pub fn submit_disabled(self) -> bool {
        self == WorkflowPhase::Submitting
    }
}

impl fmt::Display for WorkflowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WorkflowPhase::Idle => "idle",
            WorkflowPhase::Submitting => "submitting",
            WorkflowPhase::Succeeded => "succeeded",
            WorkflowPhase::Failed => "failed",
            WorkflowPhase::FallbackSucceeded => "fallback_succeeded",
        };
        write!(f, "{}", s)
    }
}

/// Status carried by a `RequestOutcome`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Pending,
    Succeeded,
    Failed,
    FallbackSucceeded,
}

impl OutcomeStatus {
    /// The phase a controller sits in while holding an outcome of this status.
    pub fn phase(self) -> WorkflowPhase {
        match self {
            OutcomeStatus::Pending => WorkflowPhase::Submitting,
            OutcomeStatus::Succeeded => WorkflowPhase::Succeeded,
            OutcomeStatus::Failed => WorkflowPhase::Failed,
            OutcomeStatus::FallbackSucceeded => WorkflowPhase::FallbackSucceeded,
        }
    }
}

/// The result of one submission.
///
/// `payload` is `None` exactly while `status` is `Pending`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOutcome {
    /// Unique per submission; two submissions of the same text differ here.
    pub request_id: Uuid,
    pub status: OutcomeStatus,
    pub payload: Option<String>,
    pub started_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl RequestOutcome {
    /// A fresh outcome for a request that has just been dispatched.
    pub fn pending() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            status: OutcomeStatus::Pending,
            payload: None,
            started_at: Utc::now(),
            resolved_at: None,
        }
    }

    /// Move this outcome to a terminal status with its payload.
    pub fn resolve(mut self, status: OutcomeStatus, payload: String) -> Self {
        debug_assert!(status != OutcomeStatus::Pending);
        self.status = status;
        self.payload = Some(payload);
        self.resolved_at = Some(Utc::now());
        self
    }

    /// True for `Succeeded` and `FallbackSucceeded`, the states the user
    /// sees as a completed request.
    pub fn looks_successful(&self) -> bool {
        matches!(
            self.status,
            OutcomeStatus::Succeeded | OutcomeStatus::FallbackSucceeded
        )
    }
}
