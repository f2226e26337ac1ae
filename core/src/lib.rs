//! # Redis Tokens Core
//!
//! Core logic for the token store: the `Token` entity and its request
//! shapes, the composite key encoding, the typed error taxonomy, the
//! `KeyValueStore` seam every backend implements, and the token service
//! built on top of it.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
