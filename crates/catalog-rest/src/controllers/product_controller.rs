//! Product controller.

use crate::{
    extractors::{ApiJson, ApiQuery, ProductIdPath},
    responses::{created, no_content, ok, ApiResult, AppError, Created},
    state::AppState,
};
use catalog_core::ErrorResponse;
use catalog_service::{
    CreateProductRequest, ProductListResponse, ProductQuery, ProductResponse, UpdateProductRequest,
};
use axum::{extract::State, http::StatusCode, routing::get, Router};
use tracing::debug;

/// Where the product routes are mounted.
pub const BASE_PATH: &str = "/api/v1/products";

/// Creates the product router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/:id", get(get_product).put(update_product).delete(delete_product))
}

/// List products.
#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    params(ProductQuery),
    responses(
        (status = 200, description = "A page of products", body = ProductListResponse),
        (status = 400, description = "Invalid query", body = ErrorResponse)
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ProductQuery>,
) -> ApiResult<ProductListResponse> {
    debug!("List products request");
    let response = state.product_service.list_products(query).await?;
    ok(response)
}

/// Get a product by ID.
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 200, description = "The product", body = ProductResponse),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    ProductIdPath(id): ProductIdPath,
) -> ApiResult<ProductResponse> {
    debug!("Get product request: {}", id);
    let response = state.product_service.get_product(id).await?;
    ok(response)
}

/// Create a product.
#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse,
            headers(("Location" = String, description = "URL of the new product"))),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateProductRequest>,
) -> Result<Created<ProductResponse>, AppError> {
    debug!("Create product request: {}", request.sku);
    let response = state.product_service.create_product(request).await?;
    Ok(created(format!("{}/{}", BASE_PATH, response.id), response))
}

/// Update the given fields of a product.
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    ProductIdPath(id): ProductIdPath,
    ApiJson(request): ApiJson<UpdateProductRequest>,
) -> ApiResult<ProductResponse> {
    debug!("Update product request: {}", id);
    let response = state.product_service.update_product(id, request).await?;
    ok(response)
}

/// Delete a product.
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    ProductIdPath(id): ProductIdPath,
) -> Result<StatusCode, AppError> {
    debug!("Delete product request: {}", id);
    state.product_service.delete_product(id).await?;
    Ok(no_content())
}
