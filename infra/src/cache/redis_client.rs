//! Redis cache client implementation
//!
//! This module provides the Redis-backed `KeyValueStore` used by the token
//! service: one multiplexed connection shared by every command, retry with
//! exponential backoff on transient failures, and a response timeout on
//! each call.

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, Client, RedisError, RedisResult};
use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

use rt_core::domain::key::mask_key;
use rt_core::errors::{StoreError, StoreResult};
use rt_core::repositories::KeyValueStore;
use rt_shared::{CacheConfig, ScanMode};

use crate::InfrastructureError;

/// Upper bound for the backoff delay between attempts
const MAX_RETRY_DELAY_MS: u64 = 5000;

type RedisFuture<T> = Pin<Box<dyn Future<Output = RedisResult<T>> + Send>>;

/// Redis cache client with retry logic
///
/// Provides a thread-safe, async Redis client with automatic connection
/// management and retry capabilities for resilient cache operations.
/// Cloning is cheap; clones share the underlying connection.
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Configuration used to create this client
    config: CacheConfig,
    /// Maximum number of attempts for each operation
    max_retries: u32,
    /// Base delay between retries (exponential backoff)
    retry_delay_ms: u64,
}

impl RedisClient {
    /// Create a new Redis client
    ///
    /// # Arguments
    /// * `config` - Cache configuration settings
    ///
    /// # Returns
    /// * `Result<Self, InfrastructureError>` - Redis client or error
    ///
    /// # Example
    /// ```no_run
    /// use rt_infra::cache::{CacheConfig, RedisClient};
    ///
    /// async fn create_client() -> Result<RedisClient, Box<dyn std::error::Error>> {
    ///     let config = CacheConfig::new("redis://localhost:6379");
    ///     let client = RedisClient::new(config).await?;
    ///     Ok(client)
    /// }
    /// ```
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        let max_retries = config.max_retries;
        let retry_delay_ms = config.retry_delay_ms;
        Self::new_with_retry_config(config, max_retries, retry_delay_ms).await
    }

    /// Create a new Redis client with custom retry configuration
    ///
    /// # Arguments
    /// * `config` - Cache configuration settings
    /// * `max_retries` - Maximum number of attempts, at least one is made
    /// * `retry_delay_ms` - Base delay between retries in milliseconds
    pub async fn new_with_retry_config(
        config: CacheConfig,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<Self, InfrastructureError> {
        let max_retries = max_retries.max(1);

        info!(
            "Creating Redis client with URL: {} (scan mode: {:?})",
            mask_url(&config.url),
            config.scan_mode
        );

        // Parse Redis URL and create client
        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection = Self::create_connection_with_retry(
            client,
            Duration::from_secs(config.connection_timeout.max(1)),
            max_retries,
            retry_delay_ms,
        )
        .await?;

        info!("Redis client created successfully");

        Ok(Self {
            connection,
            config,
            max_retries,
            retry_delay_ms,
        })
    }

    /// Create multiplexed connection with retry logic
    async fn create_connection_with_retry(
        client: Client,
        connect_timeout: Duration,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            let failure = match timeout(connect_timeout, client.get_multiplexed_async_connection())
                .await
            {
                Ok(Ok(connection)) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Ok(Err(e)) if attempts < max_retries => e.to_string(),
                Ok(Err(e)) => {
                    error!(
                        "Failed to connect to Redis after {} attempts: {}",
                        attempts, e
                    );
                    return Err(InfrastructureError::Cache(e));
                }
                Err(_) if attempts < max_retries => {
                    format!("no connection within {}s", connect_timeout.as_secs())
                }
                Err(_) => {
                    error!(
                        "Failed to connect to Redis after {} attempts: timed out",
                        attempts
                    );
                    return Err(InfrastructureError::Timeout(connect_timeout.as_secs()));
                }
            };

            warn!(
                "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                attempts, max_retries, failure, delay
            );
            sleep(Duration::from_millis(delay)).await;
            // Exponential backoff with cap at 5 seconds
            delay = (delay * 2).min(MAX_RETRY_DELAY_MS);
        }
    }

    /// Configuration this client was created with
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Check if the Redis connection is healthy
    ///
    /// Performs a PING command to verify connectivity.
    ///
    /// # Returns
    /// * `Ok(true)` - Server answered `PONG`
    /// * `Ok(false)` - Server answered something else
    pub async fn health_check(&self) -> StoreResult<bool> {
        debug!("Performing Redis health check");

        let response = self
            .execute_with_retry("PING", |mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await?;

        if response == "PONG" {
            debug!("Redis health check passed");
            Ok(true)
        } else {
            warn!("Redis health check returned unexpected response: {}", response);
            Ok(false)
        }
    }

    /// Collect matching keys with incremental `SCAN` calls
    async fn scan_keys(&self, pattern: &str) -> StoreResult<Vec<String>> {
        let mut seen = HashSet::new();
        let mut keys = Vec::new();
        let mut cursor: u64 = 0;
        let count = self.config.scan_count.max(1);

        loop {
            let (next, batch) = self
                .execute_with_retry("SCAN", |mut conn| {
                    let pattern = pattern.to_string();
                    Box::pin(async move {
                        redis::cmd("SCAN")
                            .arg(cursor)
                            .arg("MATCH")
                            .arg(pattern)
                            .arg("COUNT")
                            .arg(count)
                            .query_async::<_, (u64, Vec<String>)>(&mut conn)
                            .await
                    })
                })
                .await?;

            // SCAN may report a key more than once
            for key in batch {
                if seen.insert(key.clone()) {
                    keys.push(key);
                }
            }

            if next == 0 {
                return Ok(keys);
            }
            cursor = next;
        }
    }

    /// Execute a Redis operation with automatic retry logic
    ///
    /// Each attempt is bounded by the configured response timeout. Retriable
    /// errors and timeouts are retried with exponential backoff.
    async fn execute_with_retry<F, T>(&self, command: &'static str, operation: F) -> StoreResult<T>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        let response_timeout = self.config.response_timeout.max(1);
        let mut attempts = 0;
        let mut delay = self.retry_delay_ms;

        loop {
            attempts += 1;
            let conn = self.connection.clone();

            let failure =
                match timeout(Duration::from_secs(response_timeout), operation(conn)).await {
                    Ok(Ok(result)) => return Ok(result),
                    Ok(Err(e)) if attempts < self.max_retries && is_retriable_error(&e) => {
                        e.to_string()
                    }
                    Ok(Err(e)) => {
                        error!(
                            "Redis {} failed after {} attempts: {}",
                            command, attempts, e
                        );
                        return Err(to_store_error(&e));
                    }
                    Err(_) if attempts < self.max_retries => {
                        format!("no response within {}s", response_timeout)
                    }
                    Err(_) => {
                        error!(
                            "Redis {} timed out after {} attempts",
                            command, attempts
                        );
                        return Err(StoreError::Timeout {
                            seconds: response_timeout,
                        });
                    }
                };

            warn!(
                "Redis {} failed (attempt {}/{}): {}. Retrying in {}ms...",
                command, attempts, self.max_retries, failure, delay
            );
            sleep(Duration::from_millis(delay)).await;
            // Exponential backoff with cap at 5 seconds
            delay = (delay * 2).min(MAX_RETRY_DELAY_MS);
        }
    }
}

#[async_trait]
impl KeyValueStore for RedisClient {
    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> StoreResult<bool> {
        debug!("Setting key '{}' with expiry {:?}", mask_key(key), ttl_seconds);

        let reply = self
            .execute_with_retry("SET", |mut conn| {
                let mut cmd = redis::cmd("SET");
                cmd.arg(key).arg(value);
                if let Some(ttl) = ttl_seconds {
                    cmd.arg("EX").arg(ttl);
                }
                Box::pin(async move { cmd.query_async::<_, Option<String>>(&mut conn).await })
            })
            .await?;

        Ok(is_ok_reply(reply))
    }

    async fn set_keep_ttl(&self, key: &str, value: &str) -> StoreResult<bool> {
        debug!("Setting key '{}' keeping its expiry", mask_key(key));

        let reply = self
            .execute_with_retry("SET", |mut conn| {
                let mut cmd = redis::cmd("SET");
                cmd.arg(key).arg(value).arg("KEEPTTL");
                Box::pin(async move { cmd.query_async::<_, Option<String>>(&mut conn).await })
            })
            .await?;

        Ok(is_ok_reply(reply))
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        debug!("Getting key '{}'", mask_key(key));

        let value = self
            .execute_with_retry("GET", |mut conn| {
                let mut cmd = redis::cmd("GET");
                cmd.arg(key);
                Box::pin(async move { cmd.query_async::<_, Option<String>>(&mut conn).await })
            })
            .await?;

        if value.is_none() {
            debug!("Key '{}' not found", mask_key(key));
        }
        Ok(value)
    }

    async fn expire(&self, key: &str, seconds: u64) -> StoreResult<bool> {
        debug!("Expiring key '{}' in {}s", mask_key(key), seconds);

        let updated = self
            .execute_with_retry("EXPIRE", |mut conn| {
                let mut cmd = redis::cmd("EXPIRE");
                cmd.arg(key).arg(seconds);
                Box::pin(async move { cmd.query_async::<_, i64>(&mut conn).await })
            })
            .await?;

        Ok(updated == 1)
    }

    async fn keys(&self, pattern: &str) -> StoreResult<Vec<String>> {
        let keys = match self.config.scan_mode {
            ScanMode::Scan => self.scan_keys(pattern).await?,
            ScanMode::Keys => {
                self.execute_with_retry("KEYS", |mut conn| {
                    let mut cmd = redis::cmd("KEYS");
                    cmd.arg(pattern);
                    Box::pin(async move { cmd.query_async::<_, Vec<String>>(&mut conn).await })
                })
                .await?
            }
        };

        debug!("Pattern matched {} keys", keys.len());
        Ok(keys)
    }

    async fn ttl(&self, key: &str) -> StoreResult<Option<i64>> {
        debug!("Getting TTL for key '{}'", mask_key(key));

        let ttl = self
            .execute_with_retry("TTL", |mut conn| {
                let mut cmd = redis::cmd("TTL");
                cmd.arg(key);
                Box::pin(async move { cmd.query_async::<_, i64>(&mut conn).await })
            })
            .await?;

        // -1: no expiry, -2: missing key
        Ok((ttl >= 0).then_some(ttl))
    }

    async fn ping(&self) -> StoreResult<bool> {
        self.health_check().await
    }
}

fn is_ok_reply(reply: Option<String>) -> bool {
    matches!(reply.as_deref(), Some("OK"))
}

/// Map a Redis error onto the store seam's error type
pub(crate) fn to_store_error(error: &RedisError) -> StoreError {
    if error.is_io_error() || error.is_connection_dropped() || error.is_connection_refusal() {
        StoreError::connection(error.to_string())
    } else {
        StoreError::command(error.to_string())
    }
}

/// Check if a Redis error is retriable
///
/// Determines if an error is transient and the operation should be retried.
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Mask sensitive parts of Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let Some(at_pos) = url.rfind('@') {
        if let Some(proto_end) = url.find("://") {
            let proto = &url[..proto_end + 3];
            let host_part = &url[at_pos..];
            return format!("{}****{}", proto, host_part);
        }
    }
    url.to_string()
}
