//! Entity-DTO mappers.

use crate::dto::{ProductListResponse, ProductResponse};
use catalog_core::{Page, Product};

/// Converts a page of products to a product list response.
impl From<Page<Product>> for ProductListResponse {
    fn from(page: Page<Product>) -> Self {
        let page = page.map(ProductResponse::from);
        Self {
            page: page.request.page + 1,
            limit: page.request.size,
            total_count: page.total_count,
            total_pages: page.total_pages(),
            items: page.items,
        }
    }
}
