//! The forwarding pipeline.
//!
//! # Responsibilities
//! - Gate the inbound method
//! - Read the caller's body (declared length only)
//! - Send the rewritten request to the fixed upstream on a fresh connection
//! - Buffer the whole upstream response under one deadline
//! - Turn every upstream failure into a 502
//!
//! # Design Decisions
//! - Connection pooling is disabled; each exchange connects, and the
//!   connection is dropped once the body is read or the deadline fires
//! - No retries
//! - The forwarder is immutable and shared by every connection task

use axum::body::{Body, Bytes};
use axum::http::uri::{self, Authority, PathAndQuery, Scheme};
use axum::http::{header, HeaderMap, HeaderValue, Method, Request, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use std::str::FromStr;
use std::time::Duration;

use crate::config::UpstreamConfig;
use crate::http::error::{ForwardError, InvalidTarget};
use crate::http::request::{
    declared_body_len, is_forwarded_method, outbound_headers, read_body, upstream_target,
    ALLOW_HEADER_VALUE,
};
use crate::http::response::UpstreamResponse;

/// Forwards requests to a single upstream.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: Client<HttpConnector, Body>,
    authority: Authority,
    host: HeaderValue,
    timeout: Duration,
}

impl Forwarder {
    /// Create a forwarder for `upstream` with a deadline covering connect,
    /// send and the full response read.
    pub fn new(upstream: &UpstreamConfig, timeout: Duration) -> Result<Self, InvalidTarget> {
        let invalid = |reason: String| InvalidTarget {
            target: upstream.to_string(),
            reason,
        };

        let authority = Authority::from_str(&upstream.authority()).map_err(|e| invalid(e.to_string()))?;
        let host = HeaderValue::from_str(&upstream.host_header()).map_err(|e| invalid(e.to_string()))?;

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(timeout));
        connector.set_nodelay(true);

        let client = Client::builder(TokioExecutor::new())
            .pool_max_idle_per_host(0)
            .build(connector);

        Ok(Self {
            client,
            authority,
            host,
            timeout,
        })
    }

    /// Handle one inbound request end to end. Always yields a response.
    pub async fn relay(&self, request: Request<Body>) -> Response {
        let (parts, body) = request.into_parts();

        if !is_forwarded_method(&parts.method) {
            tracing::warn!(method = %parts.method, uri = %parts.uri, "Method not forwarded");
            return (
                StatusCode::METHOD_NOT_ALLOWED,
                [(header::ALLOW, ALLOW_HEADER_VALUE)],
            )
                .into_response();
        }

        let original = &parts.uri;
        let path = upstream_target(original);

        let body = match read_body(body, declared_body_len(&parts.headers)).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(method = %parts.method, path = %original, error = %e, "Failed to read request body");
                return e.into_response();
            }
        };

        tracing::debug!(
            method = %parts.method,
            path = %original,
            upstream_path = %path,
            body_len = body.len(),
            "Forwarding request"
        );

        match self.forward(parts.method.clone(), &path, &parts.headers, body).await {
            Ok(response) => {
                tracing::debug!(
                    method = %parts.method,
                    upstream_path = %path,
                    status = %response.status,
                    body_len = response.body.len(),
                    "Upstream responded"
                );
                response.into_response()
            }
            Err(e) => {
                tracing::error!(
                    method = %parts.method,
                    path = %original,
                    upstream_path = %path,
                    error = %e,
                    "Error forwarding request"
                );
                e.into_response()
            }
        }
    }

    /// Perform one upstream exchange.
    ///
    /// `path_and_query` is sent as is; rewriting is the caller's concern.
    pub async fn forward(
        &self,
        method: Method,
        path_and_query: &str,
        headers: &HeaderMap,
        body: Bytes,
    ) -> Result<UpstreamResponse, ForwardError> {
        let request = self.build_request(method, path_and_query, headers, body)?;

        match tokio::time::timeout(self.timeout, self.exchange(request)).await {
            Ok(result) => result,
            Err(_) => Err(ForwardError::BadGateway(format!(
                "upstream {} timed out after {}s",
                self.authority,
                self.timeout.as_secs()
            ))),
        }
    }

    fn build_request(
        &self,
        method: Method,
        path_and_query: &str,
        headers: &HeaderMap,
        body: Bytes,
    ) -> Result<Request<Body>, ForwardError> {
        let mut uri_parts = uri::Parts::default();
        uri_parts.scheme = Some(Scheme::HTTP);
        uri_parts.authority = Some(self.authority.clone());
        uri_parts.path_and_query =
            Some(PathAndQuery::from_str(path_and_query).map_err(ForwardError::bad_gateway)?);
        let uri = Uri::from_parts(uri_parts).map_err(ForwardError::bad_gateway)?;

        let body = if body.is_empty() {
            Body::empty()
        } else {
            Body::from(body)
        };

        let mut request = Request::builder()
            .method(method)
            .uri(uri)
            .body(body)
            .map_err(ForwardError::bad_gateway)?;
        *request.headers_mut() = outbound_headers(headers, self.host.clone());

        Ok(request)
    }

    async fn exchange(&self, request: Request<Body>) -> Result<UpstreamResponse, ForwardError> {
        let response = self.client.request(request).await?;
        let (parts, body) = response.into_parts();
        let body = axum::body::to_bytes(Body::new(body), usize::MAX)
            .await
            .map_err(ForwardError::bad_gateway)?;
        Ok(UpstreamResponse::from_parts(parts, body))
    }
}
