//! Caching infrastructure for the service layer.
//!
//! A single-entity look-aside cache keyed by itinerary id. Entries have
//! no expiry; they live until invalidated or overwritten.

mod cache_interface;
pub mod cache_keys;
mod memory_cache;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
#[cfg(test)]
pub use cache_interface::MockCacheInterface;
pub use memory_cache::InMemoryCacheService;
pub use redis_cache::RedisCacheService;
