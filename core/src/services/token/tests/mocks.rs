//! Mock stores for testing the token service

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::errors::{StoreError, StoreResult};
use crate::repositories::{KeyValueStore, MemoryStore};

/// Store wrapper that records commands and can inject failures
#[derive(Clone, Default)]
pub struct MockStore {
    pub inner: MemoryStore,
    pub calls: Arc<Mutex<Vec<String>>>,
    /// Every command fails as if the connection were down
    pub should_fail: bool,
    /// Writes succeed but are not acknowledged
    pub reject_writes: bool,
    /// `expire` fails for keys containing this substring
    pub fail_expire_containing: Option<String>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn rejecting_writes() -> Self {
        Self {
            reject_writes: true,
            ..Self::default()
        }
    }

    pub fn failing_expire_for(marker: &str) -> Self {
        Self {
            fail_expire_containing: Some(marker.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> StoreResult<()> {
        self.calls.lock().unwrap().push(call);
        if self.should_fail {
            return Err(StoreError::connection("connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for MockStore {
    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> StoreResult<bool> {
        self.record(format!("SET {} {:?}", key, ttl_seconds))?;
        if self.reject_writes {
            return Ok(false);
        }
        self.inner.set(key, value, ttl_seconds).await
    }

    async fn set_keep_ttl(&self, key: &str, value: &str) -> StoreResult<bool> {
        self.record(format!("SET {} KEEPTTL", key))?;
        if self.reject_writes {
            return Ok(false);
        }
        self.inner.set_keep_ttl(key, value).await
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.record(format!("GET {}", key))?;
        self.inner.get(key).await
    }

    async fn expire(&self, key: &str, seconds: u64) -> StoreResult<bool> {
        self.record(format!("EXPIRE {} {}", key, seconds))?;
        if let Some(marker) = &self.fail_expire_containing {
            if key.contains(marker.as_str()) {
                return Err(StoreError::command("simulated expire failure"));
            }
        }
        self.inner.expire(key, seconds).await
    }

    async fn keys(&self, pattern: &str) -> StoreResult<Vec<String>> {
        self.record(format!("KEYS {}", pattern))?;
        self.inner.keys(pattern).await
    }

    async fn ttl(&self, key: &str) -> StoreResult<Option<i64>> {
        self.record(format!("TTL {}", key))?;
        self.inner.ttl(key).await
    }

    async fn ping(&self) -> StoreResult<bool> {
        self.record("PING".to_string())?;
        Ok(true)
    }
}
