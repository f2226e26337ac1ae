//! Domain entities.

pub mod token;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use token::{merge_data, mask_token, Token, TokenData};
