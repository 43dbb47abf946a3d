//! Error types for the Stellar Health client.
//!
//! Validation and transport errors never terminate a workflow: validation
//! errors become a destructive notification, transport errors become the
//! demo-mode fallback. `StellarError` covers the ambient layer (config,
//! file loading, client construction).

use thiserror::Error;

/// Input rejected before any request is dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The query text is empty after trimming whitespace.
    #[error("query text is empty")]
    EmptyInput,

    /// The file is neither declared as `text/csv` nor named `*.csv`.
    #[error("file '{name}' is not a CSV file")]
    WrongFileType { name: String },

    /// Upload was requested with no staged file.
    #[error("no file selected for upload")]
    NoFileSelected,
}

/// A failed call to the remote backend.
///
/// Never shown to the end user verbatim; kept for developer diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request never produced an HTTP response (DNS, refused, timeout).
    #[error("network failure: {reason}")]
    Network { reason: String },

    /// The backend answered with a non-2xx status.
    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not JSON, or not the expected shape.
    #[error("malformed response body: {reason}")]
    MalformedBody { reason: String },
}

/// Why `submit` did not produce an outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Input failed validation; a destructive notification was issued.
    #[error("submission rejected: {0}")]
    Rejected(#[from] ValidationError),

    /// A request is already in flight for this workflow instance.
    #[error("a request is already in flight for this workflow")]
    Busy,
}

/// Errors from configuration, file loading and client construction.
#[derive(Debug, Error)]
pub enum StellarError {
    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A file chosen for upload could not be read.
    #[error("failed to read file '{path}': {reason}")]
    FileReadError { path: String, reason: String },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {reason}")]
    ClientBuildError { reason: String },
}

/// Convenience alias used throughout the Stellar crates.
pub type StellarResult<T> = Result<T, StellarError>;
