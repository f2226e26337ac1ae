//! Key-value store seam and the in-process implementation.

pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod glob;
pub mod memory;

pub use r#trait::KeyValueStore;
pub use memory::MemoryStore;

#[cfg(test)]
mod tests;
