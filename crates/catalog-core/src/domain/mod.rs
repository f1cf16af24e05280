//! Domain entities for Catalog Cloud.

pub mod product;

pub use product::*;
