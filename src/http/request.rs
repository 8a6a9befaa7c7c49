//! Inbound request handling and transformation.
//!
//! # Responsibilities
//! - Rewrite `/chat...` paths to `/v1/chat...`
//! - Decide how many body bytes to read from the caller
//! - Build the outbound header map (caller's `Host` replaced by the target)
//! - Gate the methods that are forwarded
//!
//! # Design Decisions
//! - Path rewrite works on the raw path-and-query string, case-sensitive
//! - A missing or malformed `Content-Length` means "no body", never an error
//! - Header order is not preserved across names; duplicates are

use axum::body::{Body, Bytes};
use axum::http::header::{CONTENT_LENGTH, HOST};
use axum::http::uri::PathAndQuery;
use axum::http::{HeaderMap, HeaderValue, Method, Uri};
use std::borrow::Cow;

use crate::http::error::ForwardError;

/// Methods forwarded upstream. Anything else is answered locally with 405.
pub const FORWARDED_METHODS: [Method; 6] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::OPTIONS,
];

/// `Allow` header value sent with 405 responses.
pub const ALLOW_HEADER_VALUE: &str = "GET, POST, PUT, DELETE, PATCH, OPTIONS";

pub fn is_forwarded_method(method: &Method) -> bool {
    FORWARDED_METHODS.contains(method)
}

/// Prefix `/v1` onto paths that start with `/chat`.
///
/// The check runs on the raw request target, query string included.
pub fn rewrite_path(path: &str) -> Cow<'_, str> {
    if path.starts_with("/chat") && !path.starts_with("/v1/") {
        Cow::Owned(format!("/v1{}", path))
    } else {
        Cow::Borrowed(path)
    }
}

/// Path-and-query sent upstream for an inbound request target.
///
/// Only origin-form targets (`/chat/...`) are rewritten. An absolute-form
/// target (`http://host/chat/...`) does not start with `/chat`, so its
/// path-and-query is forwarded unchanged.
pub fn upstream_target(uri: &Uri) -> Cow<'_, str> {
    let path = uri.path_and_query().map(PathAndQuery::as_str).unwrap_or("/");
    if uri.scheme().is_some() {
        Cow::Borrowed(path)
    } else {
        rewrite_path(path)
    }
}

/// Body length declared by the caller.
///
/// Returns 0 when `Content-Length` is absent, unparsable or not positive.
pub fn declared_body_len(headers: &HeaderMap) -> usize {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0)
}

/// Read exactly the declared number of body bytes.
///
/// Nothing is read when no positive length was declared; chunked bodies are
/// not decoded.
pub async fn read_body(body: Body, declared: usize) -> Result<Bytes, ForwardError> {
    if declared == 0 {
        return Ok(Bytes::new());
    }

    let bytes = axum::body::to_bytes(body, declared)
        .await
        .map_err(|e| ForwardError::InboundBody(e.to_string()))?;
    Ok(bytes)
}

/// Copy every inbound header except `Host`, then set `Host` to the target.
pub fn outbound_headers(inbound: &HeaderMap, host: HeaderValue) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(inbound.len() + 1);
    for (name, value) in inbound.iter() {
        if *name == HOST {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    headers.insert(HOST, host);
    headers
}
