//! Cache key generators for consistent key naming.
//!
//! Keys are `<record type>:<id>`. Backends may prepend their own instance
//! prefix; callers never see it.

use catalog_core::ProductId;

/// Generate the cache key for a product by ID.
#[must_use]
pub fn product_by_id(id: ProductId) -> String {
    format!("product:{}", id)
}
