//! Repository trait definitions.

use catalog_core::{CatalogResult, Interface, Page, PageRequest, Product, ProductId};
use async_trait::async_trait;

/// Filter applied to product listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring matched against name or SKU.
    pub search: Option<String>,
}

impl ProductFilter {
    /// Creates a filter from an optional search term.
    ///
    /// Blank terms are treated as no filter.
    #[must_use]
    pub fn with_search(search: Option<String>) -> Self {
        Self {
            search: search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }

    /// Returns true when `product` matches this filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match &self.search {
            None => true,
            Some(term) => {
                let term = term.to_lowercase();
                product.name.to_lowercase().contains(&term)
                    || product.sku.to_lowercase().contains(&term)
            }
        }
    }
}

/// Product repository trait, the record store contract.
///
/// Every mutation is a single atomic statement against the store.
#[async_trait]
pub trait ProductRepository: Interface + Send + Sync {
    /// Finds a product by ID.
    async fn find_by_id(&self, id: ProductId) -> CatalogResult<Option<Product>>;

    /// Inserts a new product.
    async fn insert(&self, product: &Product) -> CatalogResult<Product>;

    /// Updates an existing product.
    async fn update(&self, product: &Product) -> CatalogResult<Product>;

    /// Deletes a product by ID. Returns `true` if a row was removed.
    async fn delete(&self, id: ProductId) -> CatalogResult<bool>;

    /// Lists products matching `filter`, ordered by creation time.
    async fn query(&self, filter: &ProductFilter, page: PageRequest) -> CatalogResult<Page<Product>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, sku: &str) -> Product {
        Product::new(name.to_string(), None, 1.0, sku.to_string())
    }

    #[test]
    fn test_blank_search_is_no_filter() {
        assert_eq!(ProductFilter::with_search(Some("   ".to_string())), ProductFilter::default());
        assert_eq!(ProductFilter::with_search(None), ProductFilter::default());
    }

    #[test]
    fn test_filter_matches_name_or_sku_case_insensitive() {
        let filter = ProductFilter::with_search(Some("WIDG".to_string()));
        assert!(filter.matches(&product("Blue widget", "B-1")));
        assert!(filter.matches(&product("Gadget", "widg-7")));
        assert!(!filter.matches(&product("Gadget", "G-1")));
    }
}
