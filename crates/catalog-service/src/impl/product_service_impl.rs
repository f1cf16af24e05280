//! Product service implementation.

use crate::cache::{cache_keys, CacheEntryOptions, CacheExt, CacheInterface, PRODUCT_TTL};
use crate::dto::{
    CreateProductRequest, ProductListResponse, ProductQuery, ProductResponse, UpdateProductRequest,
};
use crate::product_service::ProductService;
use catalog_core::{CatalogError, CatalogResult, ProductChanges, ProductId, ValidateExt};
use catalog_repository::{ProductFilter, ProductRepository};
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Cache-aside product service.
///
/// Holds no state of its own beyond its collaborators, so any number of
/// requests may run through it concurrently.
#[derive(Component)]
#[shaku(interface = ProductService)]
pub struct ProductServiceImpl {
    #[shaku(inject)]
    product_repository: Arc<dyn ProductRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    #[shaku(default = CacheEntryOptions::absolute(PRODUCT_TTL))]
    product_cache_options: CacheEntryOptions,
}

impl ProductServiceImpl {
    /// Creates a new product service caching reads for [`PRODUCT_TTL`].
    #[must_use]
    pub fn new(product_repository: Arc<dyn ProductRepository>, cache: Arc<dyn CacheInterface>) -> Self {
        Self {
            product_repository,
            cache,
            product_cache_options: CacheEntryOptions::absolute(PRODUCT_TTL),
        }
    }

    /// Overrides the expiration of cached product reads.
    #[must_use]
    pub fn with_cache_options(mut self, options: CacheEntryOptions) -> Self {
        self.product_cache_options = options;
        self
    }
}

fn store_failure(operation: &'static str, id: ProductId) -> impl FnOnce(CatalogError) -> CatalogError {
    move |e| {
        error!("Record store {} failed for product {}: {}", operation, id, e);
        e
    }
}

#[async_trait]
impl ProductService for ProductServiceImpl {
    async fn get_product(&self, id: ProductId) -> CatalogResult<ProductResponse> {
        let cache_key = cache_keys::product_by_id(id);

        if let Some(cached) = self.cache.get::<ProductResponse>(&cache_key).await {
            debug!("Cache hit for product: {}", id);
            return Ok(cached);
        }

        // Concurrent misses for the same id each read the store and overwrite
        // the entry with identical data; there is no single-flight.
        let product = self
            .product_repository
            .find_by_id(id)
            .await
            .map_err(store_failure("read", id))?
            .ok_or_else(|| CatalogError::not_found("Product", id))?;

        let response = ProductResponse::from(product);
        self.cache
            .set(&cache_key, &response, self.product_cache_options)
            .await;

        debug!("Cache populated for product: {}", id);
        Ok(response)
    }

    async fn list_products(&self, query: ProductQuery) -> CatalogResult<ProductListResponse> {
        debug!(
            "Listing products, search: {:?}, page: {}, limit: {}",
            query.search, query.page, query.limit
        );

        query.validate_request()?;

        let page_request = query.page_request();
        let filter = ProductFilter::with_search(query.search);
        let page = self
            .product_repository
            .query(&filter, page_request)
            .await
            .map_err(|e| {
                error!("Record store query failed: {}", e);
                e
            })?;

        Ok(ProductListResponse::from(page))
    }

    async fn create_product(&self, request: CreateProductRequest) -> CatalogResult<ProductResponse> {
        debug!("Creating product: {}", request.sku);

        request.validate_request()?;

        let product = request.into_product();
        let saved = self
            .product_repository
            .insert(&product)
            .await
            .map_err(store_failure("insert", product.id))?;

        info!("Product created: {}", saved.id);
        Ok(ProductResponse::from(saved))
    }

    async fn update_product(
        &self,
        id: ProductId,
        request: UpdateProductRequest,
    ) -> CatalogResult<ProductResponse> {
        debug!("Updating product: {}", id);

        request.validate_request()?;

        let mut product = self
            .product_repository
            .find_by_id(id)
            .await
            .map_err(store_failure("read", id))?
            .ok_or_else(|| CatalogError::not_found("Product", id))?;

        product.apply(ProductChanges::from(request));

        let updated = self
            .product_repository
            .update(&product)
            .await
            .map_err(store_failure("update", id))?;

        self.cache.remove(&cache_keys::product_by_id(id)).await;

        info!("Product updated: {}", id);
        Ok(ProductResponse::from(updated))
    }

    async fn delete_product(&self, id: ProductId) -> CatalogResult<()> {
        debug!("Deleting product: {}", id);

        self.product_repository
            .find_by_id(id)
            .await
            .map_err(store_failure("read", id))?
            .ok_or_else(|| CatalogError::not_found("Product", id))?;

        let deleted = self
            .product_repository
            .delete(id)
            .await
            .map_err(store_failure("delete", id))?;

        // Invalidate even if a concurrent delete won the race.
        self.cache.remove(&cache_keys::product_by_id(id)).await;

        if !deleted {
            return Err(CatalogError::not_found("Product", id));
        }

        info!("Product deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for ProductServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductServiceImpl")
            .field("product_cache_options", &self.product_cache_options)
            .finish_non_exhaustive()
    }
}
