//! Redis connection configuration module

use serde::{Deserialize, Serialize};
use std::env;

/// Default Redis URL used when no connection string is supplied
pub const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";

/// How key patterns are resolved against the keyspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Incremental `SCAN ... MATCH` iteration (does not block the server)
    Scan,
    /// Single `KEYS pattern` call
    Keys,
}

impl std::str::FromStr for ScanMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scan" => Ok(ScanMode::Scan),
            "keys" => Ok(ScanMode::Keys),
            _ => Err(format!("Invalid scan mode: {}", s)),
        }
    }
}

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    #[serde(default = "default_url")]
    pub url: String,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout")]
    pub connection_timeout: u64,

    /// Response timeout in seconds
    #[serde(default = "default_timeout")]
    pub response_timeout: u64,

    /// Maximum attempts for connecting and for retriable commands
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between retries in milliseconds (doubles per attempt)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Pattern lookup strategy
    #[serde(default = "default_scan_mode")]
    pub scan_mode: ScanMode,

    /// `COUNT` hint passed to each `SCAN` call
    #[serde(default = "default_scan_count")]
    pub scan_count: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            connection_timeout: default_timeout(),
            response_timeout: default_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            scan_mode: default_scan_mode(),
            scan_count: default_scan_count(),
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            url: env::var("REDIS_URL").unwrap_or(defaults.url),
            connection_timeout: parse_env("REDIS_CONNECTION_TIMEOUT")
                .unwrap_or(defaults.connection_timeout),
            response_timeout: parse_env("REDIS_RESPONSE_TIMEOUT")
                .unwrap_or(defaults.response_timeout),
            max_retries: parse_env("REDIS_MAX_RETRIES").unwrap_or(defaults.max_retries),
            retry_delay_ms: parse_env("REDIS_RETRY_DELAY_MS").unwrap_or(defaults.retry_delay_ms),
            scan_mode: parse_env("REDIS_SCAN_MODE").unwrap_or(defaults.scan_mode),
            scan_count: parse_env("REDIS_SCAN_COUNT").unwrap_or(defaults.scan_count),
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Build from an optional connection string, falling back to the local default
    pub fn from_connection_string(connection_string: Option<&str>) -> Self {
        match connection_string {
            Some(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }

    /// Set the retry policy
    pub fn with_retries(mut self, max_retries: u32, retry_delay_ms: u64) -> Self {
        self.max_retries = max_retries.max(1);
        self.retry_delay_ms = retry_delay_ms;
        self
    }

    /// Set the pattern lookup strategy
    pub fn with_scan_mode(mut self, scan_mode: ScanMode) -> Self {
        self.scan_mode = scan_mode;
        self
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|value| value.parse().ok())
}

fn default_url() -> String {
    DEFAULT_REDIS_URL.to_string()
}

fn default_timeout() -> u64 {
    5
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    100
}

fn default_scan_mode() -> ScanMode {
    ScanMode::Scan
}

fn default_scan_count() -> usize {
    500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.url, "redis://localhost:6379");
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.scan_mode, ScanMode::Scan);
    }

    #[test]
    fn test_from_connection_string() {
        let config = CacheConfig::from_connection_string(Some("redis://cache:6380/2"));
        assert_eq!(config.url, "redis://cache:6380/2");

        let config = CacheConfig::from_connection_string(None);
        assert_eq!(config.url, DEFAULT_REDIS_URL);

        let config = CacheConfig::from_connection_string(Some(""));
        assert_eq!(config.url, DEFAULT_REDIS_URL);
    }

    #[test]
    fn test_with_retries_keeps_one_attempt() {
        let config = CacheConfig::default().with_retries(0, 10);
        assert_eq!(config.max_retries, 1);
        assert_eq!(config.retry_delay_ms, 10);
    }

    #[test]
    fn test_scan_mode_from_str() {
        assert_eq!("KEYS".parse::<ScanMode>().unwrap(), ScanMode::Keys);
        assert_eq!("scan".parse::<ScanMode>().unwrap(), ScanMode::Scan);
        assert!("hscan".parse::<ScanMode>().is_err());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: CacheConfig =
            serde_json::from_str(r#"{"url":"redis://other:6379","scan_mode":"keys"}"#).unwrap();
        assert_eq!(config.url, "redis://other:6379");
        assert_eq!(config.scan_mode, ScanMode::Keys);
        assert_eq!(config.scan_count, 500);
    }
}
