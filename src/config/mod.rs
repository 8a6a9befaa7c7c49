//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! command line flags (clap)          optional config file (TOML)
//!     │                                  → loader.rs (parse & deserialize)
//!     └──────────── overrides ──────────────┘
//!     → validation.rs (semantic checks)
//!     → BridgeConfig (validated, immutable)
//!     → shared via Arc with every connection task
//! ```
//!
//! # Design Decisions
//! - Config is immutable once built; there is no reload path
//! - All fields have defaults so the proxy runs with no flags at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod cli;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cli::Cli;
pub use loader::ConfigError;
pub use schema::{BridgeConfig, ListenerConfig, ObservabilityConfig, TimeoutConfig, UpstreamConfig};
