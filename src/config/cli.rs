//! Command line surface.
//!
//! Every flag is optional. Precedence is: explicit flag, then config file,
//! then built-in default.

use clap::Parser;
use std::path::PathBuf;

use crate::config::loader::{read_config, ConfigError};
use crate::config::schema::BridgeConfig;
use crate::config::validation::validate_config;

/// Bridge proxy (rewrite /chat -> /v1/chat)
#[derive(Debug, Parser)]
#[command(name = "bridge-proxy", version, about)]
pub struct Cli {
    /// Listen port on 127.0.0.1 (default 8320)
    #[arg(long, value_name = "PORT")]
    pub listen: Option<u16>,

    /// Target host (default 127.0.0.1)
    #[arg(long, value_name = "HOST")]
    pub target_host: Option<String>,

    /// Target port (default 8317)
    #[arg(long, value_name = "PORT")]
    pub target_port: Option<u16>,

    /// Optional TOML config file; flags given on the command line win
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Build the validated, immutable process configuration.
    pub fn into_config(self) -> Result<BridgeConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => BridgeConfig::default(),
        };

        if let Some(port) = self.listen {
            config.listener.port = port;
        }
        if let Some(host) = self.target_host {
            config.upstream.host = host;
        }
        if let Some(port) = self.target_port {
            config.upstream.port = port;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}
