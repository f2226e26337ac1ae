//! Token defaults configuration module

use serde::{Deserialize, Serialize};
use std::env;

/// Number of random bytes behind a generated token
pub const DEFAULT_TOKEN_BYTES: usize = 128;

/// Token creation and validation defaults
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TokenConfig {
    /// Random bytes per generated token (before base64url encoding)
    #[serde(default = "default_token_bytes")]
    pub token_bytes: usize,

    /// Lifetime in seconds applied when `create` receives no duration.
    /// `None` keeps such tokens until they are deleted.
    #[serde(default)]
    pub default_duration: Option<u64>,

    /// Reject key segments that would corrupt the composite key
    #[serde(default = "default_validate_input")]
    pub validate_input: bool,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            token_bytes: default_token_bytes(),
            default_duration: None,
            validate_input: default_validate_input(),
        }
    }
}

impl TokenConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let token_bytes = env::var("TOKEN_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|bytes: &usize| *bytes > 0)
            .unwrap_or_else(default_token_bytes);
        let default_duration = env::var("TOKEN_DEFAULT_DURATION")
            .ok()
            .and_then(|v| v.parse().ok());
        let validate_input = env::var("TOKEN_VALIDATE_INPUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_validate_input);

        Self {
            token_bytes,
            default_duration,
            validate_input,
        }
    }

    /// Set the default lifetime
    pub fn with_default_duration(mut self, seconds: u64) -> Self {
        self.default_duration = Some(seconds);
        self
    }
}

fn default_token_bytes() -> usize {
    DEFAULT_TOKEN_BYTES
}

fn default_validate_input() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_config_default() {
        let config = TokenConfig::default();
        assert_eq!(config.token_bytes, 128);
        assert_eq!(config.default_duration, None);
        assert!(config.validate_input);
    }

    #[test]
    fn test_with_default_duration() {
        let config = TokenConfig::default().with_default_duration(900);
        assert_eq!(config.default_duration, Some(900));
    }
}
