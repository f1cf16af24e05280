//! Caching infrastructure for the service layer.
//!
//! [`CacheInterface`] is the raw, fallible store contract; [`CacheExt`] layers
//! typed, fail-closed access on top of it. Backends: Redis (shared across
//! instances) and an in-process map.

mod cache_interface;
pub mod cache_keys;
mod cache_options;
mod memory_cache;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use cache_options::{CacheEntryOptions, DEFAULT_ABSOLUTE_EXPIRATION, PRODUCT_TTL};
pub use memory_cache::MemoryCacheService;
pub use redis_cache::{create_redis_pool, RedisCacheService, RedisCacheServiceParameters};
