//! Product id path extractor.

use crate::responses::AppError;
use catalog_core::{CatalogError, ProductId};
use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// The `{id}` path segment parsed as a [`ProductId`].
#[derive(Debug, Clone, Copy)]
pub struct ProductIdPath(pub ProductId);

#[async_trait]
impl<S> FromRequestParts<S> for ProductIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError(CatalogError::validation(rejection.body_text())))?;

        ProductId::parse(&raw)
            .map(Self)
            .map_err(|_| AppError(CatalogError::validation(format!("Invalid product id: {}", raw))))
    }
}
