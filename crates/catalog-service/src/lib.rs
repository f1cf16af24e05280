//! # Catalog Service
//!
//! The cache-aside layer. [`ProductService`] coordinates the record store
//! (`catalog-repository`) and a cache store ([`CacheInterface`]):
//!
//! - reads check the cache, fall back to the store and populate the cache
//! - writes go to the store, then invalidate the cached entry
//! - listings always go to the store
//!
//! A cache that fails behaves like an empty one.

pub mod cache;
pub mod dto;
pub mod mappers;
pub mod product_service;
pub mod r#impl;

pub use cache::*;
pub use dto::*;
pub use product_service::*;
pub use r#impl::{ProductServiceImpl, ProductServiceImplParameters};
