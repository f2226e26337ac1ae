//! Configuration for the token service

use rt_shared::config::{TokenConfig, DEFAULT_TOKEN_BYTES};

/// Configuration for the token service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenServiceConfig {
    /// Random bytes per generated token
    pub token_bytes: usize,
    /// Lifetime in seconds for tokens created without a duration
    pub default_duration: Option<u64>,
    /// Reject key segments that would corrupt the composite key
    pub validate_input: bool,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            token_bytes: DEFAULT_TOKEN_BYTES,
            default_duration: None,
            validate_input: true,
        }
    }
}

impl From<&TokenConfig> for TokenServiceConfig {
    fn from(config: &TokenConfig) -> Self {
        Self {
            token_bytes: config.token_bytes.max(1),
            default_duration: config.default_duration.filter(|secs| *secs > 0),
            validate_input: config.validate_input,
        }
    }
}

impl From<TokenConfig> for TokenServiceConfig {
    fn from(config: TokenConfig) -> Self {
        Self::from(&config)
    }
}
