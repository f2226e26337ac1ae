//! Key-value store trait consumed by the token service.

use async_trait::async_trait;

use crate::errors::StoreResult;

/// Minimal key-value store contract
///
/// This mirrors the handful of Redis commands the token service relies on.
/// Implementations own their connection handling; every method is a single
/// logical request to the store.
///
/// # Semantics
/// - Expiry values are in seconds. `expire(key, 0)` removes the key at once.
/// - `keys` takes a glob pattern (`*`, `?`, `[...]`, `\` escapes) and returns
///   matches in store-defined order.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Store `value` under `key`, optionally expiring after `ttl_seconds`
    ///
    /// # Returns
    /// * `Ok(true)` - The store acknowledged the write
    /// * `Ok(false)` - The write was not acknowledged
    /// * `Err(StoreError)` - The call failed
    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> StoreResult<bool>;

    /// Overwrite the value under `key` without touching its expiry
    async fn set_keep_ttl(&self, key: &str, value: &str) -> StoreResult<bool>;

    /// Read the value under `key`
    ///
    /// # Returns
    /// * `Ok(Some(value))` - Key exists
    /// * `Ok(None)` - Key missing or expired
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Set the expiry of an existing key
    ///
    /// # Returns
    /// * `Ok(true)` - Expiry set (or key removed for `seconds == 0`)
    /// * `Ok(false)` - Key does not exist
    async fn expire(&self, key: &str, seconds: u64) -> StoreResult<bool>;

    /// List keys matching a glob pattern
    async fn keys(&self, pattern: &str) -> StoreResult<Vec<String>>;

    /// Remaining time-to-live in seconds
    ///
    /// # Returns
    /// * `Ok(Some(seconds))` - Key exists and expires
    /// * `Ok(None)` - Key missing, or exists without an expiry
    async fn ttl(&self, key: &str) -> StoreResult<Option<i64>>;

    /// Check that the store is reachable
    async fn ping(&self) -> StoreResult<bool> {
        Ok(true)
    }
}
