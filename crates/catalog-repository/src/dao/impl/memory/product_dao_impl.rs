//! In-memory product DAO.
//!
//! Mirrors the MySQL DAO's filtering and ordering over a process-local map.
//! Used as the record store in service and HTTP tests; the call counters let
//! those tests assert how often the store was actually hit.

use crate::dao::ProductDao;
use crate::traits::ProductFilter;
use catalog_core::{CatalogError, CatalogResult, Page, PageRequest, Product, ProductId};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Process-local [`ProductDao`] with read/write counters.
#[derive(Debug, Default)]
pub struct InMemoryProductDao {
    products: RwLock<HashMap<ProductId, Product>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl InMemoryProductDao {
    /// Creates an empty DAO.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `find_by_id` calls served so far.
    #[must_use]
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of insert/update/delete calls served so far.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Number of stored products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.read().len()
    }

    /// Returns true when no products are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.read().is_empty()
    }
}

#[async_trait]
impl ProductDao for InMemoryProductDao {
    async fn find_by_id(&self, id: ProductId) -> CatalogResult<Option<Product>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.products.read().get(&id).cloned())
    }

    async fn insert(&self, product: &Product) -> CatalogResult<Product> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut products = self.products.write();
        if products.contains_key(&product.id) {
            return Err(CatalogError::conflict(format!("Duplicate product id {}", product.id)));
        }
        products.insert(product.id, product.clone());
        Ok(product.clone())
    }

    async fn update(&self, product: &Product) -> CatalogResult<Product> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut products = self.products.write();
        match products.get_mut(&product.id) {
            Some(stored) => {
                *stored = product.clone();
                Ok(product.clone())
            }
            None => Err(CatalogError::not_found("Product", product.id)),
        }
    }

    async fn delete(&self, id: ProductId) -> CatalogResult<bool> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(self.products.write().remove(&id).is_some())
    }

    async fn find_page(&self, filter: &ProductFilter, page: PageRequest) -> CatalogResult<Page<Product>> {
        let mut matching: Vec<Product> = self
            .products
            .read()
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        let total = matching.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let items = matching
            .into_iter()
            .skip(offset)
            .take(page.limit() as usize)
            .collect();

        Ok(Page::new(items, page, total))
    }
}
