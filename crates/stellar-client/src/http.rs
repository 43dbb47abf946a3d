//! Shared response handling for the HTTP backends.
//!
//! Every failure mode of a call collapses into a `TransportError` so the
//! lifecycle controller can treat them uniformly.

use serde::de::DeserializeOwned;
use tracing::debug;

use stellar_contracts::error::TransportError;

/// Map a `reqwest` send or body-read failure.
pub(crate) fn network_error(err: reqwest::Error) -> TransportError {
    let reason = if err.is_timeout() {
        format!("request timed out: {}", err)
    } else if err.is_connect() {
        format!("connection failed: {}", err)
    } else {
        err.to_string()
    };
    TransportError::Network { reason }
}

/// Check the status, then decode the body as `T`.
///
/// - non-2xx → `TransportError::Status` with the body text
/// - body not JSON, or not shaped like `T` → `TransportError::MalformedBody`
pub(crate) async fn decode_response<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, TransportError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(TransportError::Status {
            status: status.as_u16(),
            body: resp.text().await.unwrap_or_default(),
        });
    }
    let body = resp.text().await.map_err(network_error)?;
    debug!(status = status.as_u16(), bytes = body.len(), "response received");
    decode_body(&body)
}

pub(crate) fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, TransportError> {
    serde_json::from_str(body).map_err(|e| TransportError::MalformedBody {
        reason: e.to_string(),
    })
}
