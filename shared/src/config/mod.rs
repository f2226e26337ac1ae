//! Configuration module
//!
//! This module organizes configuration into logical areas:
//! - `cache` - Redis connection, retry and scan settings
//! - `environment` - Environment detection and logging configuration
//! - `token` - Token generation and validation defaults

pub mod cache;
pub mod environment;
pub mod token;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use cache::{CacheConfig, ScanMode, DEFAULT_REDIS_URL};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use token::{TokenConfig, DEFAULT_TOKEN_BYTES};

/// Prefix for environment overrides read by [`AppConfig::load`]
pub const ENV_PREFIX: &str = "TOKENS";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
}

/// Complete configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Redis configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Token defaults
    #[serde(default)]
    pub tokens: TokenConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Defaults for a given environment
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            cache: CacheConfig::default(),
            tokens: TokenConfig::default(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Load configuration from plain environment variables
    pub fn from_env() -> Self {
        Self::from_env_for(Environment::from_env())
    }

    /// Environment-variable configuration (`REDIS_*`, `TOKEN_*`, `LOG_LEVEL`) for a given environment
    pub fn from_env_for(environment: Environment) -> Self {
        Self {
            environment,
            cache: CacheConfig::from_env(),
            tokens: TokenConfig::from_env(),
            logging: LoggingConfig::for_environment(environment).with_env_overrides(),
        }
    }

    /// Load layered configuration
    ///
    /// Sources, lowest precedence first:
    /// 1. Environment-specific defaults overridden by plain variables
    ///    (`REDIS_URL`, `TOKEN_DEFAULT_DURATION`, `LOG_LEVEL`, ...)
    /// 2. The environment's config file (`config.development.toml`, ...), if present
    /// 3. Variables prefixed with `TOKENS`, nested keys separated by `__`
    ///    (e.g. `TOKENS_CACHE__URL`)
    pub fn load() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        Self::load_from(environment, environment.config_file())
    }

    /// Load layered configuration using an explicit config file path
    pub fn load_from(environment: Environment, config_file: &str) -> Result<Self, ConfigError> {
        let base = Self::from_env_for(environment);

        let settings = ::config::Config::builder()
            .add_source(::config::Config::try_from(&base)?)
            .add_source(::config::File::with_name(config_file).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
