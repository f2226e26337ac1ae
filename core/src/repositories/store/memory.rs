//! In-process key-value store
//!
//! Backs the token service in tests and local development. Expiry is
//! evaluated lazily against the tokio clock, so paused-time tests can
//! advance past a TTL without sleeping.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::errors::{StoreError, StoreResult};

use super::glob::glob_match;
use super::r#trait::KeyValueStore;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |at| at > now)
    }
}

/// Expiry instant `seconds` from `now`; Redis rejects TTLs it cannot represent
fn deadline(now: Instant, seconds: u64) -> StoreResult<Instant> {
    now.checked_add(Duration::from_secs(seconds))
        .ok_or_else(|| StoreError::command("invalid expire time"))
}

/// Key-value store held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live keys
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|entry| entry.is_live(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> StoreResult<bool> {
        if ttl_seconds == Some(0) {
            return Err(StoreError::command("invalid expire time in 'set' command"));
        }

        let expires_at = match ttl_seconds {
            Some(secs) => Some(deadline(Instant::now(), secs)?),
            None => None,
        };
        self.entries.write().await.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(true)
    }

    async fn set_keep_ttl(&self, key: &str, value: &str) -> StoreResult<bool> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        let expires_at = entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .and_then(|entry| entry.expires_at);

        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(true)
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone()))
    }

    async fn expire(&self, key: &str, seconds: u64) -> StoreResult<bool> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        let live = entries.get(key).map_or(false, |entry| entry.is_live(now));
        if !live {
            entries.remove(key);
            return Ok(false);
        }

        if seconds == 0 {
            entries.remove(key);
        } else {
            let expires_at = deadline(now, seconds)?;
            if let Some(entry) = entries.get_mut(key) {
                entry.expires_at = Some(expires_at);
            }
        }
        Ok(true)
    }

    async fn keys(&self, pattern: &str) -> StoreResult<Vec<String>> {
        let now = Instant::now();
        let entries = self.entries.read().await;

        let mut keys: Vec<String> = entries
            .iter()
            .filter(|(key, entry)| entry.is_live(now) && glob_match(pattern, key))
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        Ok(keys)
    }

    async fn ttl(&self, key: &str) -> StoreResult<Option<i64>> {
        let now = Instant::now();
        let entries = self.entries.read().await;

        Ok(entries
            .get(key)
            .filter(|entry| entry.is_live(now))
            .and_then(|entry| entry.expires_at)
            .map(|at| {
                let remaining = at.saturating_duration_since(now);
                // Round to the nearest second like Redis TTL
                ((remaining.as_millis() + 500) / 1000) as i64
            }))
    }
}
