//! `ProductRepositoryImpl`, the repository layer implementation.
//!
//! Implements the [`ProductRepository`] domain interface on top of a
//! [`ProductDao`]:
//!
//! ```text
//! Service
//!   ↓ Arc<dyn ProductRepository>
//! ProductRepositoryImpl       ← normalizes filters, logs, delegates
//!   ↓ Arc<dyn ProductDao>
//! MySqlProductDaoImpl / InMemoryProductDao
//! ```
//!
//! [`ProductRepository`]: crate::traits::ProductRepository
//! [`ProductDao`]: crate::dao::ProductDao

use crate::{dao::ProductDao, traits::ProductFilter, traits::ProductRepository};
use catalog_core::{CatalogResult, Page, PageRequest, Product, ProductId};
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use tracing::debug;

/// Repository implementation that orchestrates [`ProductDao`] access.
///
/// [`ProductDao`]: crate::dao::ProductDao
#[derive(Component)]
#[shaku(interface = ProductRepository)]
pub struct ProductRepositoryImpl {
    #[shaku(inject)]
    product_dao: Arc<dyn ProductDao>,
}

impl ProductRepositoryImpl {
    /// Creates a new `ProductRepositoryImpl` with the given DAO.
    #[must_use]
    pub fn new(product_dao: Arc<dyn ProductDao>) -> Self {
        Self { product_dao }
    }
}

#[async_trait]
impl ProductRepository for ProductRepositoryImpl {
    async fn find_by_id(&self, id: ProductId) -> CatalogResult<Option<Product>> {
        debug!("Repository: find_by_id {}", id);
        self.product_dao.find_by_id(id).await
    }

    async fn insert(&self, product: &Product) -> CatalogResult<Product> {
        debug!("Repository: insert product {}", product.id);
        self.product_dao.insert(product).await
    }

    async fn update(&self, product: &Product) -> CatalogResult<Product> {
        debug!("Repository: update product {}", product.id);
        self.product_dao.update(product).await
    }

    async fn delete(&self, id: ProductId) -> CatalogResult<bool> {
        debug!("Repository: delete product {}", id);
        self.product_dao.delete(id).await
    }

    async fn query(&self, filter: &ProductFilter, page: PageRequest) -> CatalogResult<Page<Product>> {
        debug!("Repository: query page={} size={}", page.page, page.size);
        let filter = ProductFilter::with_search(filter.search.clone());
        self.product_dao.find_page(&filter, page).await
    }
}

impl std::fmt::Debug for ProductRepositoryImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductRepositoryImpl").finish_non_exhaustive()
    }
}
