//! MySQL product DAO.

use crate::dao::ProductDao;
use crate::traits::ProductFilter;
use crate::DatabasePoolInterface;
use catalog_core::{CatalogError, CatalogResult, Page, PageRequest, Product, ProductId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

const SELECT_COLUMNS: &str = "SELECT id, name, description, price, sku, created_at, updated_at FROM products";

/// MySQL-backed [`ProductDao`].
#[derive(Component, Clone)]
#[shaku(interface = ProductDao)]
pub struct MySqlProductDaoImpl {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlProductDaoImpl {
    /// Creates a new MySQL product DAO.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a product.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: String, // CHAR(36)
    name: String,
    description: Option<String>,
    price: f64,
    sku: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = CatalogError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| CatalogError::Internal(format!("Invalid UUID in database: {}", e)))?;

        Ok(Product {
            id: ProductId::from_uuid(id),
            name: row.name,
            description: row.description,
            price: row.price,
            sku: row.sku,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Escapes `LIKE` wildcards so the term matches literally.
pub(crate) fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn like_pattern(filter: &ProductFilter) -> Option<String> {
    filter
        .search
        .as_ref()
        .map(|term| format!("%{}%", escape_like(&term.to_lowercase())))
}

#[async_trait]
impl ProductDao for MySqlProductDaoImpl {
    async fn find_by_id(&self, id: ProductId) -> CatalogResult<Option<Product>> {
        debug!("Finding product by id: {}", id);

        let row = sqlx::query_as::<_, ProductRow>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(Product::try_from).transpose()
    }

    async fn insert(&self, product: &Product) -> CatalogResult<Product> {
        debug!("Inserting product: {}", product.sku);

        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price, sku, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(product.id.to_string())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.sku)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(self.pool.inner())
        .await?;

        // MySQL has no RETURNING; read back the stored precision
        self.find_by_id(product.id)
            .await?
            .ok_or_else(|| CatalogError::internal("Failed to fetch inserted product"))
    }

    async fn update(&self, product: &Product) -> CatalogResult<Product> {
        debug!("Updating product: {}", product.id);

        sqlx::query(
            r#"
            UPDATE products
            SET name = ?, description = ?, price = ?, sku = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.sku)
        .bind(product.updated_at)
        .bind(product.id.to_string())
        .execute(self.pool.inner())
        .await?;

        self.find_by_id(product.id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Product", product.id))
    }

    async fn delete(&self, id: ProductId) -> CatalogResult<bool> {
        debug!("Deleting product: {}", id);

        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id.to_string())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_page(&self, filter: &ProductFilter, page: PageRequest) -> CatalogResult<Page<Product>> {
        debug!(
            "Finding products, search: {:?}, page: {}, size: {}",
            filter.search, page.page, page.size
        );

        let pattern = like_pattern(filter);
        let where_clause = "WHERE (? IS NULL OR LOWER(name) LIKE ? OR LOWER(sku) LIKE ?)";

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM products {where_clause}"))
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .fetch_one(self.pool.inner())
            .await?;

        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "{SELECT_COLUMNS} {where_clause} ORDER BY created_at ASC, id ASC LIMIT ? OFFSET ?"
        ))
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .bind(i64::from(page.limit()))
        .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
        .fetch_all(self.pool.inner())
        .await?;

        let products = rows
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(products, page, u64::try_from(total).unwrap_or(0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("widget"), "widget");
        assert_eq!(escape_like("50%"), "50\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("c:\\"), "c:\\\\");
    }

    #[test]
    fn test_like_pattern() {
        let filter = ProductFilter::with_search(Some("W_1".to_string()));
        assert_eq!(like_pattern(&filter).as_deref(), Some("%w\\_1%"));
        assert_eq!(like_pattern(&ProductFilter::default()), None);
    }

    #[test]
    fn test_row_with_bad_uuid_is_internal_error() {
        let now = Utc::now();
        let row = ProductRow {
            id: "garbage".to_string(),
            name: "Widget".to_string(),
            description: None,
            price: 1.0,
            sku: "W-1".to_string(),
            created_at: now,
            updated_at: now,
        };
        assert!(matches!(Product::try_from(row), Err(CatalogError::Internal(_))));
    }
}
