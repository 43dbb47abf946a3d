//! Trait seams between the lifecycle controller and its collaborators.
//!
//! - `QueryBackend`     : the remote diagnostic service (`POST /query`)
//! - `IngestBackend`    : the remote ingestion service (`POST /upload_csv`)
//! - `NotificationSink` : the transient-message surface (toasts)
//!
//! The controller never talks to the network or a UI directly; the HTTP
//! implementations live in `stellar-client`, the sinks in `stellar-notify`.

use async_trait::async_trait;

use stellar_contracts::{
    error::TransportError,
    notification::Notification,
    request::{QueryRequest, UploadCandidate},
    wire::UploadReply,
};

/// The remote diagnostic service.
#[async_trait]
pub trait QueryBackend: Send + Sync {
    /// Send the query and return the `answer` field of a well-formed reply.
    ///
    /// Network failure, a non-2xx status, and a body that is not
    /// `{"answer": string}` must all come back as `Err`.
    async fn query(&self, request: &QueryRequest) -> Result<String, TransportError>;
}

/// The remote ingestion service.
#[async_trait]
pub trait IngestBackend: Send + Sync {
    /// Upload the file as a single multipart field.
    ///
    /// Only a 2xx reply shaped `{"status": string, "message": string}` is `Ok`.
    async fn upload(&self, candidate: &UploadCandidate) -> Result<UploadReply, TransportError>;
}

/// The notification surface.
///
/// Called synchronously from the controller; implementations must not block.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: &Notification);
}
