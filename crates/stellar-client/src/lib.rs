//! # stellar-client
//!
//! HTTP implementations of the backend traits, plus configuration loading.
//!
//! ## Overview
//!
//! - `config` : TOML → `StellarConfig`
//! - `query`  : `HttpQueryBackend`, JSON `POST /query`
//! - `ingest` : `HttpIngestBackend`, multipart `POST /upload_csv`
//! - `file`   : read a file from disk into an `UploadCandidate`
//!
//! `StellarClient` owns one `reqwest::Client` and hands out controllers
//! already wired to it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stellar_client::StellarClient;
//! use stellar_notify::TracingNotifier;
//!
//! let client = StellarClient::new(config)?;
//! let queries = client.query_controller(Arc::new(TracingNotifier));
//! let outcome = queries.submit("symptoms of decompression sickness").await?;
//! ```

pub mod config;
pub mod file;
mod http;
pub mod ingest;
pub mod query;

use std::sync::Arc;

use tracing::debug;

use stellar_contracts::{
    config::StellarConfig,
    error::{StellarError, StellarResult},
};
use stellar_core::{traits::NotificationSink, IngestController, QueryController};

pub use file::candidate_from_path;
pub use ingest::HttpIngestBackend;
pub use query::HttpQueryBackend;

/// A configured HTTP client for both backend endpoints.
pub struct StellarClient {
    config: StellarConfig,
    http: reqwest::Client,
}

impl StellarClient {
    /// Build the underlying `reqwest::Client` with the configured timeout.
    pub fn new(config: StellarConfig) -> StellarResult<Self> {
        config::check(&config)?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| StellarError::ClientBuildError {
                reason: e.to_string(),
            })?;
        debug!(
            query_url = %config.query_url(),
            upload_url = %config.upload_url(),
            timeout_ms = config.request_timeout_ms,
            "http client ready"
        );
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &StellarConfig {
        &self.config
    }

    pub fn query_backend(&self) -> HttpQueryBackend {
        HttpQueryBackend::new(self.http.clone(), self.config.query_url())
    }

    pub fn ingest_backend(&self) -> HttpIngestBackend {
        HttpIngestBackend::new(self.http.clone(), self.config.upload_url())
    }

    pub fn query_controller(&self, notifier: Arc<dyn NotificationSink>) -> QueryController {
        QueryController::new(Box::new(self.query_backend()), notifier, &self.config)
    }

    pub fn ingest_controller(&self, notifier: Arc<dyn NotificationSink>) -> IngestController {
        IngestController::new(Box::new(self.ingest_backend()), notifier, &self.config)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
