//! Client configuration.
//!
//! Deserialized from TOML by `stellar-client`; every field has a default so
//! an empty document is a valid configuration.
//!
//! ```toml
//! base_url = "http://localhost:5000"
//! query_path = "/query"
//! upload_path = "/upload_csv"
//! request_timeout_ms = 30000
//! demo_fallback = true
//! success_reset_ms = 3000
//! fallback_reset_ms = 3500
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StellarConfig {
    /// Backend origin, without a trailing path.
    pub base_url: String,
    pub query_path: String,
    pub upload_path: String,
    pub request_timeout_ms: u64,
    /// When false, transport failures end in `Failed` instead of the
    /// demo-mode simulation.
    pub demo_fallback: bool,
    /// Delay before a successful upload clears itself.
    pub success_reset_ms: u64,
    /// Delay before a simulated upload clears itself.
    pub fallback_reset_ms: u64,
}

impl Default for StellarConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            query_path: "/query".to_string(),
            upload_path: "/upload_csv".to_string(),
            request_timeout_ms: 30_000,
            demo_fallback: true,
            success_reset_ms: 3_000,
            fallback_reset_ms: 3_500,
        }
    }
}

impl StellarConfig {
    pub fn query_url(&self) -> String {
        join_url(&self.base_url, &self.query_path)
    }

    pub fn upload_url(&self) -> String {
        join_url(&self.base_url, &self.upload_path)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn success_reset(&self) -> Duration {
        Duration::from_millis(self.success_reset_ms)
    }

    pub fn fallback_reset(&self) -> Duration {
        Duration::from_millis(self.fallback_reset_ms)
    }
}

/// Join origin and path with exactly one slash between them.
fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
