//! Product service trait definition.

use crate::dto::{
    CreateProductRequest, ProductListResponse, ProductQuery, ProductResponse, UpdateProductRequest,
};
use catalog_core::{CatalogResult, Interface, ProductId};
use async_trait::async_trait;

/// Product service trait, the cache-aside coordinator.
///
/// Reads go through the cache; writes go to the record store first and then
/// invalidate the product's cache entry. Cache failures never surface from
/// these methods; record store failures always do.
#[async_trait]
pub trait ProductService: Interface + Send + Sync {
    /// Gets a product by ID, populating the cache on a miss.
    async fn get_product(&self, id: ProductId) -> CatalogResult<ProductResponse>;

    /// Lists products. Never touches the cache.
    async fn list_products(&self, query: ProductQuery) -> CatalogResult<ProductListResponse>;

    /// Creates a new product.
    async fn create_product(&self, request: CreateProductRequest) -> CatalogResult<ProductResponse>;

    /// Updates the fields present in `request`.
    async fn update_product(
        &self,
        id: ProductId,
        request: UpdateProductRequest,
    ) -> CatalogResult<ProductResponse>;

    /// Deletes a product.
    async fn delete_product(&self, id: ProductId) -> CatalogResult<()>;
}
