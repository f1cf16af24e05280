//! Custom Axum extractors.
//!
//! Each one turns its axum rejection into a `400` with the standard error
//! envelope, so malformed input looks the same as a failed validation.

mod json;
mod product_id;
mod query;

pub use json::*;
pub use product_id::*;
pub use query::*;
