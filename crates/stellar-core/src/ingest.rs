//! The CSV ingestion workflow.
//!
//! Unlike the query workflow, a staged file outlives its submission: it is
//! shown with the result and cleared automatically after a fixed delay
//! (success) or a slightly longer one (demo simulation).

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{debug, info};

use stellar_contracts::{
    config::StellarConfig,
    error::{SubmitError, TransportError, ValidationError},
    event::{FileSource, IngestEvent, Reaction},
    notification::Notification,
    outcome::{OutcomeStatus, RequestOutcome, WorkflowKind, WorkflowPhase},
    request::UploadCandidate,
};

use crate::{
    fallback::upload_fallback,
    lifecycle::{RequestLifecycle, Workflow, WorkflowSnapshot},
    selection::{evaluate_selection, Selection},
    traits::{IngestBackend, NotificationSink},
    validate::rejection_notice,
};

/// Ingestion-specific half of the lifecycle.
pub struct IngestWorkflow {
    backend: Box<dyn IngestBackend>,
    success_reset: Duration,
    fallback_reset: Duration,
}

impl IngestWorkflow {
    pub fn new(
        backend: Box<dyn IngestBackend>,
        success_reset: Duration,
        fallback_reset: Duration,
    ) -> Self {
        Self {
            backend,
            success_reset,
            fallback_reset,
        }
    }
}

#[async_trait]
impl Workflow for IngestWorkflow {
    type Request = UploadCandidate;

    fn kind(&self) -> WorkflowKind {
        WorkflowKind::Ingest
    }

    fn subject<'a>(&self, request: &'a UploadCandidate) -> &'a str {
        &request.name
    }

    async fn dispatch(&self, request: &UploadCandidate) -> Result<String, TransportError> {
        let reply = self.backend.upload(request).await?;
        debug!(
            file = %request.name,
            remote_status = %reply.status,
            "upload acknowledged"
        );
        Ok(reply.message)
    }

    fn fallback(&self, request: &UploadCandidate) -> String {
        upload_fallback(&request.name)
    }

    fn success_notice(&self, request: &UploadCandidate) -> Notification {
        Notification::info(
            "Upload Successful",
            format!(
                "File \"{}\" has been processed and added to the knowledge base.",
                request.name
            ),
        )
    }

    fn demo_notice(&self, _request: &UploadCandidate) -> Notification {
        Notification::info(
            "Demo Mode",
            "File upload simulation. Connect your backend to actually process CSV files into Chroma DB.",
        )
    }

    fn failure_notice(&self, _request: &UploadCandidate) -> Notification {
        Notification::destructive(
            "Upload Failed",
            "The ingestion backend could not be reached.",
        )
    }

    fn retains_request(&self) -> bool {
        true
    }

    fn reset_delay(&self, status: OutcomeStatus) -> Option<Duration> {
        match status {
            OutcomeStatus::Succeeded => Some(self.success_reset),
            OutcomeStatus::FallbackSucceeded => Some(self.fallback_reset),
            OutcomeStatus::Pending | OutcomeStatus::Failed => None,
        }
    }
}

/// Controller for one upload view: file selection plus the lifecycle.
pub struct IngestController {
    lifecycle: RequestLifecycle<IngestWorkflow>,
}

impl IngestController {
    pub fn new(
        backend: Box<dyn IngestBackend>,
        notifier: Arc<dyn NotificationSink>,
        config: &StellarConfig,
    ) -> Self {
        let workflow =
            IngestWorkflow::new(backend, config.success_reset(), config.fallback_reset());
        Self {
            lifecycle: RequestLifecycle::new(workflow, notifier, config.demo_fallback),
        }
    }

    /// A drag is hovering; always accepted, never validated.
    pub fn drag_over(&self) -> Reaction {
        Reaction::DragAccepted
    }

    /// Handle a picker change or a drop.
    ///
    /// A valid file replaces the staged one unconditionally. An invalid one
    /// leaves it untouched and issues a destructive notification.
    pub fn select(&self, source: FileSource, file: Option<UploadCandidate>) -> Reaction {
        if self.lifecycle.phase().submit_disabled() {
            debug!(?source, "selection ignored while uploading");
            return Reaction::Ignored;
        }
        match evaluate_selection(source, file) {
            Selection::Accept(candidate) => {
                let name = candidate.name.clone();
                if !self.lifecycle.stage(candidate) {
                    return Reaction::Ignored;
                }
                info!(file = %name, ?source, "file staged");
                Reaction::Staged { name }
            }
            Selection::Reject(err) => {
                debug!(?source, error = %err, "file rejected");
                self.lifecycle.notify(rejection_notice(&err));
                Reaction::Rejected(err)
            }
            Selection::Dismissed => Reaction::Ignored,
        }
    }

    /// Drop the staged file and any stale outcome. Local only.
    pub fn cancel(&self) -> Reaction {
        if self.lifecycle.clear() {
            Reaction::Cancelled
        } else {
            Reaction::Ignored
        }
    }

    /// Upload the staged file.
    pub async fn submit(&self) -> Result<RequestOutcome, SubmitError> {
        if self.lifecycle.phase().submit_disabled() {
            return Err(SubmitError::Busy);
        }
        let Some(candidate) = self.lifecycle.staged() else {
            let err = ValidationError::NoFileSelected;
            self.lifecycle.notify(rejection_notice(&err));
            return Err(err.into());
        };
        self.lifecycle.run(candidate).await
    }

    pub async fn handle(&self, event: IngestEvent) -> Reaction {
        match event {
            IngestEvent::DragOver => self.drag_over(),
            IngestEvent::FilePicked(file) => self.select(FileSource::Picker, file),
            IngestEvent::FileDropped(file) => self.select(FileSource::Drop, file),
            IngestEvent::Cancel => self.cancel(),
            IngestEvent::Submit => match self.submit().await {
                Ok(outcome) => Reaction::Resolved(outcome),
                Err(SubmitError::Rejected(err)) => Reaction::Rejected(err),
                Err(SubmitError::Busy) => Reaction::Busy,
            },
        }
    }

    pub fn staged(&self) -> Option<UploadCandidate> {
        self.lifecycle.staged()
    }

    pub fn snapshot(&self) -> WorkflowSnapshot<UploadCandidate> {
        self.lifecycle.snapshot()
    }

    pub fn phase(&self) -> WorkflowPhase {
        self.lifecycle.phase()
    }

    pub fn subscribe(&self) -> watch::Receiver<WorkflowPhase> {
        self.lifecycle.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc, Mutex,
        },
        time::Duration,
    };

    use async_trait::async_trait;

    use stellar_contracts::{
        config::StellarConfig,
        error::{SubmitError, TransportError, ValidationError},
        event::{FileSource, IngestEvent, Reaction},
        notification::{Notification, Severity},
        outcome::{OutcomeStatus, WorkflowPhase},
        request::UploadCandidate,
        wire::UploadReply,
    };

    use super::IngestController;
    use crate::traits::{IngestBackend, NotificationSink};

    // ── Mock helpers ─────────────────────────────────────────────────────────

    #[derive(Default)]
    struct RecordingSink {
        seen: Mutex<Vec<Notification>>,
    }

    impl RecordingSink {
        fn titles(&self) -> Vec<String> {
            self.seen.lock().unwrap().iter().map(|n| n.title.clone()).collect()
        }
    }

    impl NotificationSink for RecordingSink {
        fn notify(&self, notification: &Notification) {
            self.seen.lock().unwrap().push(notification.clone());
        }
    }

    struct MockBackend {
        calls: Arc<AtomicUsize>,
        reply: Result<UploadReply, TransportError>,
    }

    #[async_trait]
    impl IngestBackend for MockBackend {
        async fn upload(
            &self,
            _candidate: &UploadCandidate,
        ) -> Result<UploadReply, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }
    }

    fn ok_reply() -> Result<UploadReply, TransportError> {
        Ok(UploadReply {
            status: "success".to_string(),
            message: "ok".to_string(),
        })
    }

    fn controller_with(
        reply: Result<UploadReply, TransportError>,
        config: StellarConfig,
    ) -> (IngestController, Arc<AtomicUsize>, Arc<RecordingSink>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let sink = Arc::new(RecordingSink::default());
        let ctrl = IngestController::new(
            Box::new(MockBackend {
                calls: calls.clone(),
                reply,
            }),
            sink.clone(),
            &config,
        );
        (ctrl, calls, sink)
    }

    fn controller(
        reply: Result<UploadReply, TransportError>,
    ) -> (IngestController, Arc<AtomicUsize>, Arc<RecordingSink>) {
        controller_with(reply, StellarConfig::default())
    }

    fn file(name: &str, size: usize) -> UploadCandidate {
        UploadCandidate::new(name, None, vec![b'1'; size])
    }

    // ── Selection ─────────────────────────────────────────────────────────────

    #[test]
    fn drag_over_accepted_without_validation() {
        let (ctrl, _, sink) = controller(ok_reply());
        assert_eq!(ctrl.drag_over(), Reaction::DragAccepted);
        assert!(sink.seen.lock().unwrap().is_empty());
        assert!(ctrl.staged().is_none());
    }

    /// notes.txt → rejected, destructive notice, nothing staged.
    #[test]
    fn text_file_rejected_and_nothing_staged() {
        let (ctrl, _, sink) = controller(ok_reply());

        let reaction = ctrl.select(FileSource::Picker, Some(file("notes.txt", 10)));

        assert!(matches!(
            reaction,
            Reaction::Rejected(ValidationError::WrongFileType { .. })
        ));
        assert!(ctrl.staged().is_none());
        let seen = sink.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].title, "Invalid File Type");
        assert_eq!(seen[0].severity, Severity::Destructive);
    }

    #[test]
    fn invalid_selection_keeps_previous_candidate() {
        let (ctrl, _, _) = controller(ok_reply());
        ctrl.select(FileSource::Picker, Some(file("vitals.csv", 20)));

        ctrl.select(FileSource::Drop, Some(file("photo.png", 99)));

        assert_eq!(ctrl.staged().unwrap().name, "vitals.csv");
    }

    #[test]
    fn reselection_replaces_staged_file() {
        let (ctrl, _, _) = controller(ok_reply());
        ctrl.select(FileSource::Picker, Some(file("a.csv", 1)));
        let reaction = ctrl.select(FileSource::Drop, Some(file("b.csv", 2)));

        assert_eq!(
            reaction,
            Reaction::Staged {
                name: "b.csv".to_string()
            }
        );
        assert_eq!(ctrl.staged().unwrap().name, "b.csv");
    }

    #[test]
    fn dismissed_picker_changes_nothing() {
        let (ctrl, _, sink) = controller(ok_reply());
        ctrl.select(FileSource::Picker, Some(file("a.csv", 1)));

        assert_eq!(ctrl.select(FileSource::Picker, None), Reaction::Ignored);
        assert_eq!(ctrl.staged().unwrap().name, "a.csv");
        assert!(sink.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn cancel_discards_candidate() {
        let (ctrl, _, _) = controller(ok_reply());
        ctrl.select(FileSource::Picker, Some(file("a.csv", 1)));

        assert_eq!(ctrl.cancel(), Reaction::Cancelled);
        assert!(ctrl.staged().is_none());
        assert_eq!(ctrl.phase(), WorkflowPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_after_upload_clears_stale_outcome() {
        let (ctrl, _, _) = controller(ok_reply());
        ctrl.select(FileSource::Picker, Some(file("data.csv", 500)));
        ctrl.submit().await.unwrap();
        assert!(ctrl.snapshot().outcome.is_some());

        assert_eq!(ctrl.cancel(), Reaction::Cancelled);

        let snap = ctrl.snapshot();
        assert!(snap.outcome.is_none());
        assert!(snap.staged.is_none());
        assert_eq!(snap.phase, WorkflowPhase::Idle);
    }

    // ── Submission ────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn submit_without_file_is_rejected() {
        let (ctrl, calls, sink) = controller(ok_reply());

        let result = ctrl.submit().await;

        assert_eq!(
            result,
            Err(SubmitError::Rejected(ValidationError::NoFileSelected))
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(sink.titles(), vec!["No File Selected".to_string()]);
    }

    /// data.csv (500 bytes), backend says success → Succeeded, then the
    /// candidate clears itself after the fixed delay.
    #[tokio::test(start_paused = true)]
    async fn successful_upload_then_auto_reset() {
        let (ctrl, calls, sink) = controller(ok_reply());
        ctrl.select(FileSource::Picker, Some(file("data.csv", 500)));
        assert_eq!(ctrl.staged().unwrap().byte_size, 500);

        let outcome = ctrl.submit().await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(outcome.status, OutcomeStatus::Succeeded);
        assert_eq!(outcome.payload.as_deref(), Some("ok"));
        assert_eq!(ctrl.phase(), WorkflowPhase::Succeeded);
        assert!(ctrl.staged().is_some(), "file stays visible with the result");
        assert_eq!(sink.titles(), vec!["Upload Successful".to_string()]);
        assert!(sink.seen.lock().unwrap()[0].description.contains("data.csv"));

        tokio::time::sleep(Duration::from_millis(3001)).await;

        assert_eq!(ctrl.phase(), WorkflowPhase::Idle);
        assert!(ctrl.staged().is_none());
        assert!(ctrl.snapshot().outcome.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_upload_simulates_success_then_resets() {
        let (ctrl, _, sink) = controller(Err(TransportError::MalformedBody {
            reason: "expected value at line 1".to_string(),
        }));
        ctrl.select(FileSource::Drop, Some(file("crew_vitals.csv", 64)));

        let outcome = ctrl.submit().await.unwrap();

        assert_eq!(outcome.status, OutcomeStatus::FallbackSucceeded);
        assert!(outcome.payload.unwrap().contains("crew_vitals.csv"));
        assert_eq!(sink.titles(), vec!["Demo Mode".to_string()]);

        tokio::time::sleep(Duration::from_millis(3001)).await;
        assert_eq!(ctrl.phase(), WorkflowPhase::FallbackSucceeded, "simulation holds longer");

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(ctrl.phase(), WorkflowPhase::Idle);
        assert!(ctrl.staged().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_upload_without_demo_keeps_file_for_retry() {
        let config = StellarConfig {
            demo_fallback: false,
            ..StellarConfig::default()
        };
        let (ctrl, calls, sink) = controller_with(
            Err(TransportError::Status {
                status: 503,
                body: "unavailable".to_string(),
            }),
            config,
        );
        ctrl.select(FileSource::Picker, Some(file("a.csv", 1)));

        let outcome = ctrl.submit().await.unwrap();
        assert_eq!(outcome.status, OutcomeStatus::Failed);
        assert!(sink.seen.lock().unwrap()[0].is_destructive());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(ctrl.phase(), WorkflowPhase::Failed);
        assert!(ctrl.staged().is_some());

        ctrl.submit().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn new_selection_during_reset_delay_survives() {
        let (ctrl, _, _) = controller(ok_reply());
        ctrl.select(FileSource::Picker, Some(file("first.csv", 1)));
        ctrl.submit().await.unwrap();

        tokio::time::sleep(Duration::from_millis(1000)).await;
        ctrl.select(FileSource::Picker, Some(file("second.csv", 1)));
        assert_eq!(ctrl.phase(), WorkflowPhase::Idle);

        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert_eq!(ctrl.staged().unwrap().name, "second.csv");
    }

    #[tokio::test]
    async fn handle_drives_full_interaction() {
        let (ctrl, _, _) = controller(ok_reply());

        assert_eq!(ctrl.handle(IngestEvent::DragOver).await, Reaction::DragAccepted);
        assert!(matches!(
            ctrl.handle(IngestEvent::FileDropped(None)).await,
            Reaction::Rejected(_)
        ));
        assert_eq!(
            ctrl.handle(IngestEvent::FileDropped(Some(file("x.csv", 3)))).await,
            Reaction::Staged {
                name: "x.csv".to_string()
            }
        );
        assert!(matches!(
            ctrl.handle(IngestEvent::Submit).await,
            Reaction::Resolved(o) if o.status == OutcomeStatus::Succeeded
        ));
    }
}
