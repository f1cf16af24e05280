//! OpenAPI documentation configuration.

use crate::controllers::health_controller::{ComponentHealth, HealthResponse};
use catalog_core::{ErrorResponse, FieldError, ProductId};
use catalog_service::{
    CreateProductRequest, ProductListResponse, ProductResponse, UpdateProductRequest,
};
use utoipa::OpenApi;

/// OpenAPI documentation for the Catalog Cloud API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog Cloud API",
        version = "1.0.0",
        description = "Product catalog with a read-through cache",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Product endpoints
        crate::controllers::product_controller::list_products,
        crate::controllers::product_controller::get_product,
        crate::controllers::product_controller::create_product,
        crate::controllers::product_controller::update_product,
        crate::controllers::product_controller::delete_product,
        // Health endpoints
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            ProductId,
            ErrorResponse,
            FieldError,
            CreateProductRequest,
            UpdateProductRequest,
            ProductResponse,
            ProductListResponse,
            HealthResponse,
            ComponentHealth,
        )
    ),
    tags(
        (name = "products", description = "Product management endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
