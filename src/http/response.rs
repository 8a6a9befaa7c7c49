//! Response handling and transformation.
//!
//! # Responsibilities
//! - Hold the fully buffered upstream response
//! - Strip hop-by-hop headers before relaying to the caller
//! - Relay status code and reason phrase as upstream sent them
//!
//! # Design Decisions
//! - Bodies are buffered, never streamed
//! - Non-canonical reason phrases travel through hyper's `ReasonPhrase` extension

use axum::body::{Body, Bytes};
use axum::http::response::Parts;
use axum::http::{HeaderMap, HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use hyper::ext::ReasonPhrase;

/// Headers meaningful only for a single transport connection.
pub const HOP_BY_HOP_HEADERS: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailers",
    "transfer-encoding",
    "upgrade",
];

pub fn is_hop_by_hop(name: &str) -> bool {
    HOP_BY_HOP_HEADERS
        .iter()
        .any(|h| name.eq_ignore_ascii_case(h))
}

/// Remove every hop-by-hop header, all values included.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let hop: Vec<HeaderName> = headers
        .keys()
        .filter(|name| is_hop_by_hop(name.as_str()))
        .cloned()
        .collect();
    for name in hop {
        headers.remove(name);
    }
}

/// A fully read upstream response.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub reason: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl UpstreamResponse {
    /// Build from the head of a hyper client response and its collected body.
    pub fn from_parts(parts: Parts, body: Bytes) -> Self {
        let reason = parts
            .extensions
            .get::<ReasonPhrase>()
            .map(|r| String::from_utf8_lossy(r.as_bytes()).into_owned())
            .or_else(|| parts.status.canonical_reason().map(str::to_owned))
            .unwrap_or_default();

        Self {
            status: parts.status,
            reason,
            headers: parts.headers,
            body,
        }
    }
}

impl IntoResponse for UpstreamResponse {
    fn into_response(self) -> Response {
        let mut headers = self.headers;
        strip_hop_by_hop(&mut headers);

        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = headers;

        let canonical = self.status.canonical_reason().unwrap_or_default();
        if !self.reason.is_empty() && self.reason != canonical {
            if let Ok(reason) = ReasonPhrase::try_from(self.reason.as_bytes()) {
                response.extensions_mut().insert(reason);
            }
        }

        response
    }
}
