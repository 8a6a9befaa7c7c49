//! Bridge proxy
//!
//! A small HTTP forwarding proxy built with Tokio and Axum.
//!
//! ```text
//!   Client ──▶ 127.0.0.1:<listen> ──▶ rewrite /chat → /v1/chat ──▶ <target-host>:<target-port>
//!   Client ◀── hop-by-hop headers stripped ◀──────────────────────── upstream response
//! ```
//!
//! Usage:
//! `bridge-proxy --listen 8320 --target-host 127.0.0.1 --target-port 8317`

use clap::Parser;

use bridge_proxy::config::Cli;
use bridge_proxy::lifecycle::Shutdown;
use bridge_proxy::observability::logging;
use bridge_proxy::BridgeServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    logging::init(&config.observability);
    tracing::debug!(?config, "Configuration loaded");

    let server = BridgeServer::new(config)?;
    let listener = server.bind().await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let _signal_task = shutdown.trigger_on_signal();

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
