//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the forwarding handler
//! - Wire up middleware (request tracing)
//! - Bind the loopback listener
//! - Serve until the shutdown signal fires

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::BridgeConfig;
use crate::http::error::InvalidTarget;
use crate::http::forward::Forwarder;

/// Error type for server operations.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Target(#[from] InvalidTarget),
}

/// HTTP server for the bridge proxy.
pub struct BridgeServer {
    router: Router,
    config: Arc<BridgeConfig>,
}

impl BridgeServer {
    /// Create a new server with the given configuration.
    pub fn new(config: BridgeConfig) -> Result<Self, ServerError> {
        let forwarder = Arc::new(Forwarder::new(&config.upstream, config.timeouts.upstream())?);
        let router = Self::build_router(forwarder);

        Ok(Self {
            router,
            config: Arc::new(config),
        })
    }

    /// Build the Axum router. Every request target, whatever its path, goes
    /// through the forwarder.
    pub fn build_router(forwarder: Arc<Forwarder>) -> Router {
        Router::new()
            .fallback(forward_handler)
            .with_state(forwarder)
            .layer(TraceLayer::new_for_http())
    }

    /// Bind the configured loopback address.
    pub async fn bind(&self) -> Result<TcpListener, ServerError> {
        let addr = self.config.listener.bind_address();
        TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires. In-flight requests are allowed to finish.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            listen = %addr,
            target = %self.config.upstream,
            timeout_secs = self.config.timeouts.upstream_secs,
            "Bridge proxy listening"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutting down");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn forward_handler(State(forwarder): State<Arc<Forwarder>>, request: Request<Body>) -> Response {
    forwarder.relay(request).await
}
