//! Business services built on the key-value store seam.

pub mod token;

// Re-export commonly used types
pub use token::{generate_token, TokenFacade, TokenService, TokenServiceConfig};
