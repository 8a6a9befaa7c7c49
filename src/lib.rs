//! Bridge proxy library.
//!
//! Forwards every request to one fixed upstream, rewriting `/chat...` paths
//! to `/v1/chat...` on the way.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::BridgeConfig;
pub use http::{BridgeServer, Forwarder};
pub use lifecycle::Shutdown;
