//! The request lifecycle controller shared by both workflows.
//!
//! Every submission follows the same path:
//!
//!   Guard → Pending → dispatch → (Succeeded | FallbackSucceeded | Failed) → Notify → [Reset]
//!
//! The guard refuses a second submission while one is in flight. A
//! transport failure never reaches the user as a raw error: with
//! `demo_fallback` on it becomes a labelled simulation, with it off it
//! becomes `Failed` with a destructive notification. Validation happens in
//! the workflow-specific controllers before `run` is reached.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use stellar_contracts::{
    error::{SubmitError, TransportError},
    notification::Notification,
    outcome::{OutcomeStatus, RequestOutcome, WorkflowKind, WorkflowPhase},
};

use crate::traits::NotificationSink;

/// The parts of a workflow that differ between query and ingestion.
#[async_trait]
pub trait Workflow: Send + Sync + 'static {
    /// The validated request this workflow dispatches.
    type Request: Clone + Send + Sync + 'static;

    fn kind(&self) -> WorkflowKind;

    /// Short description of the request for logs (query text, file name).
    fn subject<'a>(&self, request: &'a Self::Request) -> &'a str;

    /// Call the backend and extract the payload from a well-formed reply.
    async fn dispatch(&self, request: &Self::Request) -> Result<String, TransportError>;

    /// Demo-mode payload for a request the backend could not serve.
    fn fallback(&self, request: &Self::Request) -> String;

    fn success_notice(&self, request: &Self::Request) -> Notification;

    fn demo_notice(&self, request: &Self::Request) -> Notification;

    fn failure_notice(&self, request: &Self::Request) -> Notification;

    /// Whether the request stays staged after it resolves.
    ///
    /// Ingestion keeps the file until the reset (or a retry); a query is
    /// discarded as soon as its response resolves.
    fn retains_request(&self) -> bool;

    /// Delay after which an outcome of `status` clears itself, if ever.
    fn reset_delay(&self, status: OutcomeStatus) -> Option<Duration>;
}

/// A point-in-time copy of a controller's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowSnapshot<R> {
    pub phase: WorkflowPhase,
    pub outcome: Option<RequestOutcome>,
    /// The staged or in-flight request.
    pub staged: Option<R>,
}

impl<R> Default for WorkflowSnapshot<R> {
    fn default() -> Self {
        Self {
            phase: WorkflowPhase::Idle,
            outcome: None,
            staged: None,
        }
    }
}

// ── Internal shared state ─────────────────────────────────────────────────────

struct LifecycleState<R> {
    snapshot: WorkflowSnapshot<R>,
    /// Bumped on every user-visible change. A deferred reset only fires if
    /// the generation it was scheduled at is still current.
    generation: u64,
}

struct Shared<R> {
    state: Mutex<LifecycleState<R>>,
    phase_tx: watch::Sender<WorkflowPhase>,
}

impl<R> Shared<R> {
    fn lock(&self) -> MutexGuard<'_, LifecycleState<R>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, phase: WorkflowPhase) {
        self.phase_tx.send_replace(phase);
    }
}

// ── Controller ────────────────────────────────────────────────────────────────

/// Drives one workflow instance through its lifecycle.
///
/// Construct one per view. Dropping it cancels any pending reset: the timer
/// task only holds a weak reference to the state.
pub struct RequestLifecycle<W: Workflow> {
    workflow: W,
    notifier: Arc<dyn NotificationSink>,
    demo_fallback: bool,
    shared: Arc<Shared<W::Request>>,
}

impl<W: Workflow> RequestLifecycle<W> {
    pub fn new(workflow: W, notifier: Arc<dyn NotificationSink>, demo_fallback: bool) -> Self {
        let (phase_tx, _) = watch::channel(WorkflowPhase::Idle);
        let shared = Shared {
            state: Mutex::new(LifecycleState {
                snapshot: WorkflowSnapshot::default(),
                generation: 0,
            }),
            phase_tx,
        };
        Self {
            workflow,
            notifier,
            demo_fallback,
            shared: Arc::new(shared),
        }
    }

    pub fn workflow(&self) -> &W {
        &self.workflow
    }

    pub fn snapshot(&self) -> WorkflowSnapshot<W::Request> {
        self.shared.lock().snapshot.clone()
    }

    pub fn phase(&self) -> WorkflowPhase {
        self.shared.lock().snapshot.phase
    }

    /// Receive every phase change from now on.
    pub fn subscribe(&self) -> watch::Receiver<WorkflowPhase> {
        self.shared.phase_tx.subscribe()
    }

    pub fn staged(&self) -> Option<W::Request> {
        self.shared.lock().snapshot.staged.clone()
    }

    /// Hand a notification to the surface.
    pub fn notify(&self, notification: Notification) {
        debug!(
            workflow = %self.workflow.kind(),
            title = %notification.title,
            severity = ?notification.severity,
            "issuing notification"
        );
        self.notifier.notify(&notification);
    }

    /// Stage `request` for a later `run`, replacing anything staged.
    ///
    /// Clears a stale outcome and returns to `Idle`. Refused (returns
    /// `false`) while a request is in flight.
    pub fn stage(&self, request: W::Request) -> bool {
        let mut state = self.shared.lock();
        if state.snapshot.phase == WorkflowPhase::Submitting {
            debug!(workflow = %self.workflow.kind(), "stage ignored while submitting");
            return false;
        }
        state.snapshot = WorkflowSnapshot {
            phase: WorkflowPhase::Idle,
            outcome: None,
            staged: Some(request),
        };
        state.generation += 1;
        drop(state);
        self.shared.publish(WorkflowPhase::Idle);
        true
    }

    /// Discard the staged request and any outcome. Refused while in flight.
    pub fn clear(&self) -> bool {
        let mut state = self.shared.lock();
        if state.snapshot.phase == WorkflowPhase::Submitting {
            debug!(workflow = %self.workflow.kind(), "clear ignored while submitting");
            return false;
        }
        state.snapshot = WorkflowSnapshot::default();
        state.generation += 1;
        drop(state);
        self.shared.publish(WorkflowPhase::Idle);
        true
    }

    /// Dispatch a validated request and drive it to a terminal outcome.
    ///
    /// # Errors
    ///
    /// Only `SubmitError::Busy`, when another request from this instance is
    /// still in flight. Transport failures are not errors here; they resolve
    /// to `FallbackSucceeded` (or `Failed` with demo fallback disabled).
    pub async fn run(&self, request: W::Request) -> Result<RequestOutcome, SubmitError> {
        let kind = self.workflow.kind();

        // ── Guard + Idle→Submitting ──────────────────────────────────────────
        let (pending, submitted_at) = {
            let mut state = self.shared.lock();
            if state.snapshot.phase == WorkflowPhase::Submitting {
                debug!(workflow = %kind, "submission refused, request already in flight");
                return Err(SubmitError::Busy);
            }
            let pending = RequestOutcome::pending();
            state.snapshot = WorkflowSnapshot {
                phase: WorkflowPhase::Submitting,
                outcome: Some(pending.clone()),
                staged: Some(request.clone()),
            };
            state.generation += 1;
            (pending, state.generation)
        };
        self.shared.publish(WorkflowPhase::Submitting);
        let mut in_flight = InFlight {
            shared: Arc::clone(&self.shared),
            generation: submitted_at,
            kind,
            retain: self.workflow.retains_request(),
            armed: true,
        };

        info!(
            workflow = %kind,
            request_id = %pending.request_id,
            subject = %self.workflow.subject(&request),
            "request submitted"
        );

        // ── Dispatch ─────────────────────────────────────────────────────────
        let (status, payload, notice) = match self.workflow.dispatch(&request).await {
            Ok(payload) => {
                info!(workflow = %kind, request_id = %pending.request_id, "backend answered");
                (
                    OutcomeStatus::Succeeded,
                    payload,
                    self.workflow.success_notice(&request),
                )
            }
            Err(err) if self.demo_fallback => {
                warn!(
                    workflow = %kind,
                    request_id = %pending.request_id,
                    error = %err,
                    "backend unavailable, serving demo fallback"
                );
                (
                    OutcomeStatus::FallbackSucceeded,
                    self.workflow.fallback(&request),
                    self.workflow.demo_notice(&request),
                )
            }
            Err(err) => {
                warn!(
                    workflow = %kind,
                    request_id = %pending.request_id,
                    error = %err,
                    "backend unavailable, demo fallback disabled"
                );
                (
                    OutcomeStatus::Failed,
                    err.to_string(),
                    self.workflow.failure_notice(&request),
                )
            }
        };

        // ── Submitting→terminal ──────────────────────────────────────────────
        let resolved = pending.resolve(status, payload);
        let generation = {
            let mut state = self.shared.lock();
            state.snapshot.phase = status.phase();
            state.snapshot.outcome = Some(resolved.clone());
            if !self.workflow.retains_request() {
                state.snapshot.staged = None;
            }
            state.generation += 1;
            state.generation
        };
        in_flight.armed = false;
        self.shared.publish(status.phase());

        debug!(
            workflow = %kind,
            request_id = %resolved.request_id,
            phase = %status.phase(),
            "request resolved"
        );

        self.notify(notice);

        if let Some(delay) = self.workflow.reset_delay(status) {
            self.schedule_reset(generation, delay);
        }

        Ok(resolved)
    }

    /// Return to `Idle` after `delay`, unless something happened meanwhile
    /// or the controller is gone.
    fn schedule_reset(&self, generation: u64, delay: Duration) {
        let weak: Weak<Shared<W::Request>> = Arc::downgrade(&self.shared);
        let kind = self.workflow.kind();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let Some(shared) = weak.upgrade() else {
                debug!(workflow = %kind, "controller dropped before reset fired");
                return;
            };

            let mut state = shared.lock();
            if state.generation != generation {
                debug!(workflow = %kind, "reset superseded by a newer interaction");
                return;
            }
            state.snapshot = WorkflowSnapshot::default();
            state.generation += 1;
            drop(state);
            shared.publish(WorkflowPhase::Idle);
            debug!(workflow = %kind, "workflow reset to idle");
        });
    }
}

// ── Abandoned submissions ─────────────────────────────────────────────────────

/// Armed for the duration of a dispatch. If the `run` future is dropped
/// before the terminal write, returns the workflow to `Idle` so the next
/// interaction is not refused as busy.
struct InFlight<R> {
    shared: Arc<Shared<R>>,
    generation: u64,
    kind: WorkflowKind,
    retain: bool,
    armed: bool,
}

impl<R> Drop for InFlight<R> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.shared.lock();
        if state.generation != self.generation
            || state.snapshot.phase != WorkflowPhase::Submitting
        {
            return;
        }
        state.snapshot.phase = WorkflowPhase::Idle;
        state.snapshot.outcome = None;
        if !self.retain {
            state.snapshot.staged = None;
        }
        state.generation += 1;
        drop(state);
        self.shared.publish(WorkflowPhase::Idle);
        warn!(workflow = %self.kind, "submission abandoned mid-dispatch, back to idle");
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
