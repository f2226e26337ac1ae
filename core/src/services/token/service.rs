//! Main token service implementation

use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};

use rt_shared::validation::validate_segments;

use crate::domain::entities::token::{mask_token, merge_data, Token, TokenData};
use crate::domain::key::{self, mask_key};
use crate::domain::value_objects::{
    CreateToken, DeleteAllTokens, DeleteToken, GetToken, RefreshToken, UpdateToken,
};
use crate::errors::{StoreError, TokenError, TokenResult};
use crate::repositories::KeyValueStore;

use super::config::TokenServiceConfig;
use super::generator::generate_token;

/// Stored value for an empty payload
const EMPTY_DATA: &str = "{}";

/// Service translating token operations into key-value store calls
///
/// The service keeps no token state of its own; the store is the only
/// source of truth. Every operation reports failures through [`TokenError`]
/// so callers can tell a missing token from an unreachable store.
pub struct TokenService<S: KeyValueStore> {
    store: Arc<S>,
    config: TokenServiceConfig,
}

impl<S: KeyValueStore> Clone for TokenService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
        }
    }
}

impl<S: KeyValueStore> TokenService<S> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `store` - Key-value store holding the token records
    /// * `config` - Token service configuration
    pub fn new(store: Arc<S>, config: TokenServiceConfig) -> Self {
        Self { store, config }
    }

    /// Creates a token service with default configuration
    pub fn with_store(store: S) -> Self {
        Self::new(Arc::new(store), TokenServiceConfig::default())
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Issues a new token
    ///
    /// Uses `custom_token` when it is non-empty, otherwise generates a random
    /// value. The payload is stored as JSON under the composite key, expiring
    /// after `duration` seconds (or the configured default) when one is set.
    ///
    /// # Returns
    ///
    /// * `Ok(Token)` - The stored token
    /// * `Err(TokenError::InvalidInput)` - A key segment was rejected
    /// * `Err(TokenError::StoreUnavailable)` - The write failed or was not acknowledged
    pub async fn create(&self, request: CreateToken) -> TokenResult<Token> {
        let CreateToken {
            app,
            token_type,
            owner,
            data,
            custom_token,
            duration,
        } = request;

        let custom_token = custom_token.filter(|token| !token.is_empty());

        if self.config.validate_input {
            let mut segments = vec![
                ("app", app.as_str()),
                ("type", token_type.as_str()),
                ("owner", owner.as_str()),
            ];
            if let Some(token) = custom_token.as_deref() {
                segments.push(("token", token));
            }
            validate_segments(segments)?;
        }

        let token_value = custom_token.unwrap_or_else(|| generate_token(self.config.token_bytes));
        let token = Token::new(app, token_type, owner, data.unwrap_or_default(), token_value);

        let key = token.key();
        let value = serde_json::to_string(&token.data).map_err(|e| TokenError::InvalidInput {
            field: "data".to_string(),
            message: format!("Failed to serialize token data: {}", e),
        })?;

        // A zero duration means "no expiry"
        let ttl = duration
            .filter(|secs| *secs > 0)
            .or(self.config.default_duration);

        let acknowledged = self.store.set(&key, &value, ttl).await?;
        if !acknowledged {
            return Err(StoreError::command("SET was not acknowledged").into());
        }

        info!(
            app = %token.app,
            token_type = %token.token_type,
            token = %token.masked(),
            ttl = ?ttl,
            "Token created"
        );

        Ok(token)
    }

    /// Reads a token by app, type and token value
    ///
    /// The owner is recovered from the matched key.
    ///
    /// # Returns
    ///
    /// * `Ok(Token)` - Token found
    /// * `Err(TokenError::NotFound)` - No matching record
    /// * `Err(TokenError::MalformedStoredData)` - The stored value is not a JSON object
    pub async fn get(&self, request: GetToken) -> TokenResult<Token> {
        let key = self
            .locate(&request.app, &request.token_type, &request.token)
            .await?;

        let raw = self
            .store
            .get(&key)
            .await?
            .ok_or_else(|| TokenError::not_found(&request.app, &request.token_type))?;

        let owner = owner_of(&key)?;
        let data = parse_data(&key, &raw)?;

        debug!(
            app = %request.app,
            token_type = %request.token_type,
            token = %mask_token(&request.token),
            "Token retrieved"
        );

        Ok(Token::new(
            request.app,
            request.token_type,
            owner,
            data,
            request.token,
        ))
    }

    /// Extends a token's lifetime to `duration` seconds from now
    pub async fn refresh(&self, request: RefreshToken) -> TokenResult<()> {
        let key = self
            .locate(&request.app, &request.token_type, &request.token)
            .await?;

        if !self.store.expire(&key, request.duration).await? {
            return Err(TokenError::not_found(&request.app, &request.token_type));
        }

        debug!(
            app = %request.app,
            token_type = %request.token_type,
            token = %mask_token(&request.token),
            duration = request.duration,
            "Token refreshed"
        );

        Ok(())
    }

    /// Merges `data` into a token's payload
    ///
    /// `null` values remove keys, other values overwrite them. The record's
    /// expiry is left unchanged. Read and write are separate store calls, so
    /// concurrent updates of the same token can overwrite each other.
    pub async fn update(&self, request: UpdateToken) -> TokenResult<Token> {
        let UpdateToken {
            app,
            token_type,
            token,
            data: patch,
        } = request;

        let key = self.locate(&app, &token_type, &token).await?;

        let raw = self
            .store
            .get(&key)
            .await?
            .ok_or_else(|| TokenError::not_found(&app, &token_type))?;

        let owner = owner_of(&key)?;
        let mut data = parse_data(&key, &raw)?;
        merge_data(&mut data, patch);

        let value = serde_json::to_string(&data).map_err(|e| TokenError::InvalidInput {
            field: "data".to_string(),
            message: format!("Failed to serialize token data: {}", e),
        })?;

        if !self.store.set_keep_ttl(&key, &value).await? {
            return Err(StoreError::command("SET KEEPTTL was not acknowledged").into());
        }

        debug!(
            app = %app,
            token_type = %token_type,
            token = %mask_token(&token),
            fields = data.len(),
            "Token data updated"
        );

        Ok(Token::new(app, token_type, owner, data, token))
    }

    /// Deletes a token by expiring it immediately
    pub async fn delete(&self, request: DeleteToken) -> TokenResult<()> {
        let key = self
            .locate(&request.app, &request.token_type, &request.token)
            .await?;

        if !self.store.expire(&key, 0).await? {
            return Err(TokenError::not_found(&request.app, &request.token_type));
        }

        info!(
            app = %request.app,
            token_type = %request.token_type,
            token = %mask_token(&request.token),
            "Token deleted"
        );

        Ok(())
    }

    /// Deletes every token of one owner
    ///
    /// Matching keys are expired concurrently and independently. A failure on
    /// one key does not stop the others and nothing is rolled back.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of keys that were expired
    pub async fn delete_all(&self, request: DeleteAllTokens) -> TokenResult<usize> {
        let pattern = if self.config.validate_input {
            validate_segments([
                ("app", request.app.as_str()),
                ("type", request.token_type.as_str()),
                ("owner", request.owner.as_str()),
            ])?;
            key::owner_pattern(&request.app, &request.token_type, &request.owner)
        } else {
            key::loose_owner_pattern(&request.app, &request.token_type, &request.owner)
        };
        let keys = self.store.keys(&pattern).await?;

        let results = join_all(keys.iter().map(|key| self.store.expire(key, 0))).await;

        let mut expired = 0;
        for (key, result) in keys.iter().zip(results) {
            match result {
                Ok(true) => expired += 1,
                Ok(false) => {}
                Err(e) => warn!(key = %mask_key(key), error = %e, "Failed to expire token"),
            }
        }

        info!(
            app = %request.app,
            token_type = %request.token_type,
            matched = keys.len(),
            expired,
            "Deleted owner tokens"
        );

        Ok(expired)
    }

    /// Remaining lifetime of a token in seconds, `None` when it never expires
    pub async fn ttl(&self, request: GetToken) -> TokenResult<Option<i64>> {
        let key = self
            .locate(&request.app, &request.token_type, &request.token)
            .await?;
        Ok(self.store.ttl(&key).await?)
    }

    /// Check that the underlying store is reachable
    pub async fn ping(&self) -> TokenResult<bool> {
        Ok(self.store.ping().await?)
    }

    /// Find the key holding `token`, whatever its owner
    ///
    /// Tokens are expected to be unique per app and type. If several owners
    /// somehow share one, the first key the store returns is used.
    async fn locate(&self, app: &str, token_type: &str, token: &str) -> TokenResult<String> {
        let pattern = if self.config.validate_input {
            validate_segments([("app", app), ("type", token_type), ("token", token)])?;
            key::lookup_pattern(app, token_type, token)
        } else {
            key::loose_lookup_pattern(app, token_type, token)
        };
        let mut keys = self.store.keys(&pattern).await?;

        if keys.len() > 1 {
            warn!(
                app = %app,
                token_type = %token_type,
                token = %mask_token(token),
                matches = keys.len(),
                "Token lookup matched several keys, using the first"
            );
        }

        if keys.is_empty() {
            debug!(
                app = %app,
                token_type = %token_type,
                token = %mask_token(token),
                "Token not found"
            );
            return Err(TokenError::not_found(app, token_type));
        }

        Ok(keys.swap_remove(0))
    }
}

/// Owner segment of a matched key
fn owner_of(key: &str) -> TokenResult<String> {
    key::owner_from_key(key)
        .map(str::to_string)
        .ok_or_else(|| TokenError::MalformedStoredData {
            key: mask_key(key),
            message: "key has no owner segment".to_string(),
        })
}

/// Parse a stored payload, which must be a JSON object
fn parse_data(key: &str, raw: &str) -> TokenResult<TokenData> {
    if raw == EMPTY_DATA {
        return Ok(TokenData::new());
    }

    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(other) => Err(TokenError::MalformedStoredData {
            key: mask_key(key),
            message: format!("expected a JSON object, found {}", json_kind(&other)),
        }),
        Err(e) => Err(TokenError::MalformedStoredData {
            key: mask_key(key),
            message: e.to_string(),
        }),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_data() {
        assert!(parse_data("k", "{}").unwrap().is_empty());
        assert_eq!(parse_data("k", r#"{"a":1}"#).unwrap()["a"], 1);

        let err = parse_data("k", "[1,2]").unwrap_err();
        assert!(err.to_string().contains("an array"));

        let err = parse_data("k", "not json").unwrap_err();
        assert_eq!(err.kind(), crate::errors::ErrorKind::MalformedStoredData);
    }
}
