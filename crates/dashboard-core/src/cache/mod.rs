//! Response cache module

pub mod keys;
mod memory;
mod store;

pub use memory::MemoryCache;
pub use store::{CacheStats, CacheStore};
