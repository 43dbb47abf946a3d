//! The diagnostic query workflow.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::sync::watch;

use stellar_contracts::{
    config::StellarConfig,
    error::{SubmitError, TransportError},
    event::{QueryEvent, Reaction},
    notification::Notification,
    outcome::{OutcomeStatus, RequestOutcome, WorkflowKind, WorkflowPhase},
    request::QueryRequest,
};

use crate::{
    fallback::query_fallback,
    lifecycle::{RequestLifecycle, Workflow, WorkflowSnapshot},
    traits::{NotificationSink, QueryBackend},
    validate::{rejection_notice, validate_query},
};

/// Query-specific half of the lifecycle: endpoint, fallback, notices.
pub struct QueryWorkflow {
    backend: Box<dyn QueryBackend>,
}

impl QueryWorkflow {
    pub fn new(backend: Box<dyn QueryBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Workflow for QueryWorkflow {
    type Request = QueryRequest;

    fn kind(&self) -> WorkflowKind {
        WorkflowKind::Query
    }

    fn subject<'a>(&self, request: &'a QueryRequest) -> &'a str {
        &request.text
    }

    async fn dispatch(&self, request: &QueryRequest) -> Result<String, TransportError> {
        self.backend.query(request).await
    }

    fn fallback(&self, request: &QueryRequest) -> String {
        query_fallback(&request.text)
    }

    fn success_notice(&self, _request: &QueryRequest) -> Notification {
        Notification::info("Analysis Complete", "AI diagnostic results ready!")
    }

    fn demo_notice(&self, _request: &QueryRequest) -> Notification {
        Notification::info(
            "Demo Mode Active",
            "Connect your backend for real AI diagnostics.",
        )
    }

    fn failure_notice(&self, _request: &QueryRequest) -> Notification {
        Notification::destructive(
            "Request Failed",
            "The diagnostic backend could not be reached.",
        )
    }

    fn retains_request(&self) -> bool {
        false
    }

    fn reset_delay(&self, _status: OutcomeStatus) -> Option<Duration> {
        None
    }
}

/// Controller for one query view.
///
/// Stays in its terminal phase until the next submission overwrites it.
pub struct QueryController {
    lifecycle: RequestLifecycle<QueryWorkflow>,
}

impl QueryController {
    pub fn new(
        backend: Box<dyn QueryBackend>,
        notifier: Arc<dyn NotificationSink>,
        config: &StellarConfig,
    ) -> Self {
        Self {
            lifecycle: RequestLifecycle::new(
                QueryWorkflow::new(backend),
                notifier,
                config.demo_fallback,
            ),
        }
    }

    /// Validate `text` and, if it passes, run it to a terminal outcome.
    ///
    /// An empty query issues one destructive notification and never
    /// reaches the backend.
    pub async fn submit(&self, text: &str) -> Result<RequestOutcome, SubmitError> {
        if self.lifecycle.phase().submit_disabled() {
            return Err(SubmitError::Busy);
        }
        let request = match validate_query(text) {
            Ok(request) => request,
            Err(err) => {
                self.lifecycle.notify(rejection_notice(&err));
                return Err(err.into());
            }
        };
        self.lifecycle.run(request).await
    }

    pub async fn handle(&self, event: QueryEvent) -> Reaction {
        match event {
            QueryEvent::Submit { text } => match self.submit(&text).await {
                Ok(outcome) => Reaction::Resolved(outcome),
                Err(SubmitError::Rejected(err)) => Reaction::Rejected(err),
                Err(SubmitError::Busy) => Reaction::Busy,
            },
        }
    }

    pub fn snapshot(&self) -> WorkflowSnapshot<QueryRequest> {
        self.lifecycle.snapshot()
    }

    pub fn phase(&self) -> WorkflowPhase {
        self.lifecycle.phase()
    }

    pub fn subscribe(&self) -> watch::Receiver<WorkflowPhase> {
        self.lifecycle.subscribe()
    }
}
