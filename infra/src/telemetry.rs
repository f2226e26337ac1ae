//! Tracing subscriber setup

use rt_shared::{LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

use crate::InfrastructureError;

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over `config.level` when set. Fails if a
/// global subscriber is already installed.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=rt_infra=debug,rt_core=debug cargo run --example token_lifecycle
/// ```
pub fn init_tracing(config: &LoggingConfig) -> Result<(), InfrastructureError> {
    let filter = create_env_filter(&config.level)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(config.colored)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    result.map_err(|e| InfrastructureError::General(format!("Failed to initialize tracing: {}", e)))
}

/// Creates an environment filter, falling back to `level`
fn create_env_filter(level: &str) -> Result<EnvFilter, InfrastructureError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| InfrastructureError::Config(format!("Invalid log filter '{}': {}", level, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_env_filter() {
        assert!(create_env_filter("info").is_ok());
        assert!(create_env_filter("rt_infra=debug,warn").is_ok());
    }

    #[test]
    fn test_init_tracing_only_once() {
        let config = LoggingConfig {
            format: LogFormat::Compact,
            colored: false,
            ..Default::default()
        };

        assert!(init_tracing(&config).is_ok());
        assert!(init_tracing(&config).is_err());
    }
}
