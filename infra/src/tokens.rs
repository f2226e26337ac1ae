//! Connecting a token store to Redis
//!
//! ```no_run
//! use rt_core::CreateToken;
//!
//! # async fn demo() -> Result<(), rt_infra::InfrastructureError> {
//! let tokens = rt_infra::tokens::connect(None).await?;
//! let token = tokens
//!     .create(CreateToken::new("billing", "password-reset", "user-42").with_duration(900))
//!     .await;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use tracing::info;

use rt_core::services::{TokenFacade, TokenService, TokenServiceConfig};
use rt_shared::{AppConfig, CacheConfig};

use crate::cache::RedisClient;
use crate::InfrastructureError;

/// Token store over Redis with present/absent results
pub type RedisTokens = TokenFacade<RedisClient>;

/// Typed token service over Redis
pub type RedisTokenService = TokenService<RedisClient>;

/// Connect to Redis and build a token store
///
/// `None` or an empty string connects to `redis://localhost:6379`.
pub async fn connect(connection_string: Option<&str>) -> Result<RedisTokens, InfrastructureError> {
    connect_service(connection_string).await.map(TokenFacade::new)
}

/// Connect to Redis and build the typed token service
pub async fn connect_service(
    connection_string: Option<&str>,
) -> Result<RedisTokenService, InfrastructureError> {
    let cache = CacheConfig::from_connection_string(connection_string);
    build_service(cache, TokenServiceConfig::default()).await
}

/// Build a token store from loaded application configuration
pub async fn connect_with_config(config: &AppConfig) -> Result<RedisTokens, InfrastructureError> {
    build_service(config.cache.clone(), TokenServiceConfig::from(&config.tokens))
        .await
        .map(TokenFacade::new)
}

async fn build_service(
    cache: CacheConfig,
    config: TokenServiceConfig,
) -> Result<RedisTokenService, InfrastructureError> {
    let client = RedisClient::new(cache).await?;

    info!(
        token_bytes = config.token_bytes,
        default_duration = ?config.default_duration,
        validate_input = config.validate_input,
        "Token store ready"
    );

    Ok(TokenService::new(Arc::new(client), config))
}
