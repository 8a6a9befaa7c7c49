//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (one task per connection)
//!     → server.rs (Axum setup, catch-all route)
//!     → forward.rs (method gate, upstream exchange under one deadline)
//!         → request.rs (path rewrite, body length, Host override)
//!         → hyper client, fresh connection per request
//!         → response.rs (hop-by-hop filtering, status + reason relay)
//!     → Send to client (or a synthesized 502)
//! ```

pub mod error;
pub mod forward;
pub mod request;
pub mod response;
pub mod server;

pub use error::{ForwardError, InvalidTarget};
pub use forward::Forwarder;
pub use request::rewrite_path;
pub use response::{is_hop_by_hop, UpstreamResponse, HOP_BY_HOP_HEADERS};
pub use server::{BridgeServer, ServerError};
