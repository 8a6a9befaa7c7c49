//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::BridgeConfig;
use crate::config::validation::ValidationError;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Read a TOML config file. Missing sections fall back to defaults.
///
/// The result is not validated yet; command line overrides are applied first.
pub fn read_config(path: &Path) -> Result<BridgeConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("bridge-proxy-{}-{}.toml", name, std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn reads_full_file_ignoring_timeouts() {
        let path = temp_file(
            "full",
            r#"
[listener]
port = 9100

[upstream]
host = "localhost"
port = 9200

[timeouts]
upstream_secs = 5

[observability]
log_level = "debug"
"#,
        );
        let config = read_config(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.listener.port, 9100);
        assert_eq!(config.upstream.host, "localhost");
        assert_eq!(config.upstream.port, 9200);
        assert_eq!(config.timeouts.upstream_secs, 20, "timeouts are not file-configurable");
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_config(Path::new("/nonexistent/bridge-proxy.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn bad_toml_is_parse_error() {
        let path = temp_file("bad", "[upstream\nport = ");
        let err = read_config(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
