//! Cache module for Redis-backed token storage
//!
//! This module provides the Redis client used as the token store, including
//! connection management, retry logic and the key-value commands the token
//! service relies on.

pub mod redis_client;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;

// Re-export commonly used types
pub use rt_shared::config::cache::{CacheConfig, ScanMode, DEFAULT_REDIS_URL};
