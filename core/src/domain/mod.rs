//! Domain layer containing the token entity, request value objects and key encoding.

pub mod entities;
pub mod key;
pub mod value_objects;

// Re-export commonly used domain types
pub use entities::*;
pub use value_objects::*;
