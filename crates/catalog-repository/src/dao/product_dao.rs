//! `ProductDao` trait, the low-level product data access abstraction.
//!
//! [`ProductRepository`] uses a `ProductDao` to fulfil domain-level
//! operations.
//!
//! [`ProductRepository`]: crate::traits::ProductRepository

use crate::traits::ProductFilter;
use catalog_core::{CatalogResult, Interface, Page, PageRequest, Product, ProductId};
use async_trait::async_trait;

/// Low-level product data access object.
///
/// Each implementation targets a single data source.
#[async_trait]
pub trait ProductDao: Interface + Send + Sync {
    /// Finds a product by ID.
    async fn find_by_id(&self, id: ProductId) -> CatalogResult<Option<Product>>;

    /// Persists a new product and returns the stored row.
    async fn insert(&self, product: &Product) -> CatalogResult<Product>;

    /// Overwrites an existing product and returns the stored row.
    ///
    /// Returns `NotFound` if no row has the product's id.
    async fn update(&self, product: &Product) -> CatalogResult<Product>;

    /// Deletes a product by ID. Returns `true` if deleted.
    async fn delete(&self, id: ProductId) -> CatalogResult<bool>;

    /// Returns one page of matching products plus the total match count.
    async fn find_page(&self, filter: &ProductFilter, page: PageRequest) -> CatalogResult<Page<Product>>;
}
