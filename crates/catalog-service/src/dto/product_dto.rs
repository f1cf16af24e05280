//! Product DTOs.

use catalog_core::validation::rules::{not_blank, positive_price};
use catalog_core::{PageRequest, Product, ProductChanges, ProductId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Request to create a new product.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(
        custom(function = "not_blank", message = "Name is required"),
        length(max = 200, message = "Name cannot exceed 200 characters")
    )]
    #[schema(example = "Widget")]
    pub name: String,

    #[validate(length(max = 2000, message = "Description cannot exceed 2000 characters"))]
    pub description: Option<String>,

    #[validate(custom(function = "positive_price"))]
    #[schema(example = 9.99)]
    pub price: f64,

    #[validate(
        custom(function = "not_blank", message = "SKU is required"),
        length(max = 64, message = "SKU cannot exceed 64 characters")
    )]
    #[schema(example = "W-1")]
    pub sku: String,
}

impl CreateProductRequest {
    /// Builds the product entity, assigning a fresh id and timestamps.
    #[must_use]
    pub fn into_product(self) -> Product {
        Product::new(
            self.name.trim().to_string(),
            self.description,
            self.price,
            self.sku.trim().to_string(),
        )
    }
}

/// Request to update a product. Only the fields present change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(
        custom(function = "not_blank", message = "Name cannot be blank"),
        length(max = 200, message = "Name cannot exceed 200 characters")
    )]
    pub name: Option<String>,

    /// Absent keeps the description, `null` clears it.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(length(max = 2000, message = "Description cannot exceed 2000 characters"))]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,

    #[validate(custom(function = "positive_price"))]
    pub price: Option<f64>,

    #[validate(
        custom(function = "not_blank", message = "SKU cannot be blank"),
        length(max = 64, message = "SKU cannot exceed 64 characters")
    )]
    pub sku: Option<String>,
}

/// Wraps any value that is present in the body, `null` included.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl From<UpdateProductRequest> for ProductChanges {
    fn from(request: UpdateProductRequest) -> Self {
        Self {
            name: request.name.map(|n| n.trim().to_string()),
            description: request.description,
            price: request.price,
            sku: request.sku.map(|s| s.trim().to_string()),
        }
    }
}

/// Product response DTO.
///
/// This is also the cached representation of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub sku: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            sku: product.sku,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Query parameters for listing products.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Case-insensitive substring of the name or SKU.
    pub search: Option<String>,

    /// Page number, starting at 1.
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    #[param(default = 1, minimum = 1)]
    pub page: u32,

    /// Items per page.
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    #[param(default = 10, minimum = 1, maximum = 100)]
    pub limit: u32,
}

const fn default_page() -> u32 {
    1
}

const fn default_limit() -> u32 {
    PageRequest::DEFAULT_SIZE
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            search: None,
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl ProductQuery {
    /// The 0-based page request for the record store.
    #[must_use]
    pub fn page_request(&self) -> PageRequest {
        PageRequest::from_one_based(self.page, self.limit)
    }
}

/// Product list response with pagination.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductListResponse {
    pub items: Vec<ProductResponse>,
    pub total_count: u64,
    /// 1-based page number.
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
}
