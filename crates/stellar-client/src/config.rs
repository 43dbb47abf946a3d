//! TOML loading for `StellarConfig`.
//!
//! Every key is optional; missing keys take the defaults from
//! `StellarConfig::default()`. Unknown keys are rejected so a typo does not
//! silently fall back to a default endpoint.

use std::path::Path;

use tracing::debug;

use stellar_contracts::{
    config::StellarConfig,
    error::{StellarError, StellarResult},
};

/// Parse `s` as a TOML client configuration.
///
/// Returns `StellarError::ConfigError` if the TOML is malformed, contains
/// unknown keys, or names a `base_url` that is not http(s).
pub fn from_toml_str(s: &str) -> StellarResult<StellarConfig> {
    let config: StellarConfig = toml::from_str(s).map_err(|e| StellarError::ConfigError {
        reason: format!("failed to parse config TOML: {}", e),
    })?;
    check(&config)?;
    debug!(base_url = %config.base_url, demo_fallback = config.demo_fallback, "config loaded");
    Ok(config)
}

/// Read the file at `path` and parse it with [`from_toml_str`].
pub fn from_file(path: &Path) -> StellarResult<StellarConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| StellarError::ConfigError {
        reason: format!("failed to read config file '{}': {}", path.display(), e),
    })?;
    from_toml_str(&contents)
}

/// Reject configurations no request could succeed with.
pub fn check(config: &StellarConfig) -> StellarResult<()> {
    if !(config.base_url.starts_with("http://") || config.base_url.starts_with("https://")) {
        return Err(StellarError::ConfigError {
            reason: format!("base_url '{}' must start with http:// or https://", config.base_url),
        });
    }
    if config.request_timeout_ms == 0 {
        return Err(StellarError::ConfigError {
            reason: "request_timeout_ms must be greater than zero".to_string(),
        });
    }
    Ok(())
}
