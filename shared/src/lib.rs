//! Shared configuration and helpers for the Redis token store
//!
//! This crate provides functionality used across the workspace:
//! - Configuration types (Redis connection, token defaults, environment, logging)
//! - Validation helpers for the segments of composite token keys

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use crate::config::{
    AppConfig, CacheConfig, ConfigError, Environment, LogFormat, LoggingConfig, ScanMode,
    TokenConfig,
};
pub use crate::utils::validation;
