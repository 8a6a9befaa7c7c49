//! Error types for the forwarding pipeline.
//!
//! Every upstream failure collapses into `BadGateway` at the forwarder
//! boundary and is answered with a 502 carrying a short description.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForwardError {
    /// Connect, send or receive against the upstream failed.
    #[error("Bad Gateway: {0}")]
    BadGateway(String),

    /// The caller's body could not be read.
    #[error("Bad Request: {0}")]
    InboundBody(String),
}

impl ForwardError {
    pub fn bad_gateway(cause: impl fmt::Display) -> Self {
        ForwardError::BadGateway(cause.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ForwardError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ForwardError::InboundBody(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<hyper_util::client::legacy::Error> for ForwardError {
    fn from(err: hyper_util::client::legacy::Error) -> Self {
        ForwardError::BadGateway(error_chain(&err))
    }
}

impl IntoResponse for ForwardError {
    fn into_response(self) -> Response {
        (
            self.status(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}

/// Flatten an error and its sources into one line.
///
/// hyper's client errors keep the useful part ("connection refused") in the
/// source chain.
pub fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// The configured upstream cannot be turned into a URI authority or Host header.
#[derive(Debug, Error)]
#[error("invalid upstream target {target}: {reason}")]
pub struct InvalidTarget {
    pub target: String,
    pub reason: String,
}
