//! JSON body extractor.

use crate::responses::AppError;
use catalog_core::CatalogError;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

/// `Json<T>` whose rejection is a validation error.
///
/// Field rules are checked by the service, not here.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError(CatalogError::validation(format!("Invalid JSON body: {}", rejection.body_text())))
            })?;
        Ok(Self(value))
    }
}
