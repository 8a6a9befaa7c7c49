//! Observability subsystem.
//!
//! Structured logging through `tracing`. Request spans come from
//! tower-http's `TraceLayer` in the server.

pub mod logging;
