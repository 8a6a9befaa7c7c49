//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (ports non-zero, timeout > 0)
//! - Make sure the upstream host can be written into a `Host` header
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BridgeConfig → Result<(), Vec<ValidationError>>

use axum::http::HeaderValue;
use thiserror::Error;

use crate::config::schema::BridgeConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listen port must not be 0")]
    ListenPortZero,

    #[error("target port must not be 0")]
    TargetPortZero,

    #[error("target host must not be empty")]
    EmptyTargetHost,

    #[error("target host {0:?} contains characters not allowed in a Host header")]
    InvalidTargetHost(String),

    #[error("upstream timeout must be at least 1 second")]
    ZeroTimeout,
}

pub fn validate_config(config: &BridgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port == 0 {
        errors.push(ValidationError::ListenPortZero);
    }
    if config.upstream.port == 0 {
        errors.push(ValidationError::TargetPortZero);
    }

    let host = &config.upstream.host;
    if host.trim().is_empty() {
        errors.push(ValidationError::EmptyTargetHost);
    } else if host.chars().any(char::is_whitespace)
        || HeaderValue::from_str(&config.upstream.host_header()).is_err()
    {
        errors.push(ValidationError::InvalidTargetHost(host.clone()));
    }

    if config.timeouts.upstream_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
