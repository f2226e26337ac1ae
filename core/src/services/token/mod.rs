//! Token service module
//!
//! This module handles all token store operations:
//! - Token issuance with generated or caller-chosen values
//! - Lookup by app/type/token with the owner recovered from the key
//! - Payload merges that keep the record's expiry
//! - Lifetime extension and soft deletion through expiry
//! - A lenient facade that reports every failure as an absent result

mod config;
mod facade;
mod generator;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use facade::TokenFacade;
pub use generator::generate_token;
pub use service::TokenService;
