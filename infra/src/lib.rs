//! # Infrastructure Layer
//!
//! Concrete implementations behind the token store:
//! - **Cache**: Redis client implementing the `KeyValueStore` seam
//! - **Telemetry**: tracing subscriber setup driven by `LoggingConfig`
//! - **Tokens**: helpers that connect to Redis and hand back a token store

// Re-export core types for convenience
pub use rt_core::errors::*;

/// Cache module - Redis client and operations
pub mod cache;

/// Tracing initialisation
pub mod telemetry;

/// Ready-to-use token store handles
pub mod tokens;

use rt_shared::{AppConfig, Environment};

/// Load application configuration
///
/// Reads the environment's dotenv file (`.env.development`, ...) and `.env`
/// if present, then layers plain `REDIS_*`/`TOKEN_*` variables, the
/// environment's config file and `TOKENS_*` overrides. Falls back to plain
/// environment variables when layered loading fails.
pub fn load_config() -> AppConfig {
    // Variables already set win over both files
    dotenvy::from_filename(Environment::from_env().env_file()).ok();
    dotenvy::dotenv().ok();

    match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Failed to load layered configuration: {}. Using environment", e);
            AppConfig::from_env()
        }
    }
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Redis did not answer in time
    #[error("Cache timed out after {0}s")]
    Timeout(u64),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_reads_redis_variables() {
        std::env::set_var("REDIS_RESPONSE_TIMEOUT", "7");
        let config = load_config();
        std::env::remove_var("REDIS_RESPONSE_TIMEOUT");

        assert_eq!(config.cache.response_timeout, 7);
    }
}
