//! Cache implementations
//!
//! - `MemoryCache`: in-process TTL cache for provider responses

mod memory_cache;

pub use memory_cache::MemoryCache;
