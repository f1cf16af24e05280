//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for all layers of Catalog Cloud.
///
/// Cache failures are represented here so the cache adapters have something
/// to log, but they never leave the cache boundary: the typed cache API in
/// the service crate absorbs them.
#[derive(Error, Debug)]
pub enum CatalogError {
    // ============ Domain Errors ============
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Validation error, with per-field detail when a validator produced it
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        fields: Vec<FieldError>,
    },

    /// Conflict error (e.g., duplicate entry)
    #[error("Conflict: {0}")]
    Conflict(String),

    // ============ Infrastructure Errors ============
    /// Record store connectivity or transaction failure
    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),

    /// Cache store failure
    #[error("Cache unavailable: {0}")]
    CacheUnavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CatalogError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation { .. } => 400,
            Self::Conflict(_) => 409,
            Self::StoreUnavailable(_)
            | Self::CacheUnavailable(_)
            | Self::Configuration(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::CacheUnavailable(_) => "CACHE_UNAVAILABLE",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation {
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates a record store error.
    #[must_use]
    pub fn store<T: Into<String>>(message: T) -> Self {
        Self::StoreUnavailable(message.into())
    }

    /// Creates a cache error.
    #[must_use]
    pub fn cache<T: Into<String>>(message: T) -> Self {
        Self::CacheUnavailable(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true for a missing resource.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Checks if this error is transient.
    ///
    /// The core never retries on its own; callers and the store client
    /// configuration decide what to do with this.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_) | Self::CacheUnavailable(_))
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => {
                // MySQL ER_DUP_ENTRY / SQLSTATE 23000 unique violation
                if let Some(code) = db_err.code() {
                    if code == "23000" || code == "1062" {
                        return Self::Conflict(db_err.message().to_string());
                    }
                }
                Self::StoreUnavailable(err.to_string())
            }
            _ => Self::StoreUnavailable(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional field-level errors for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-level validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `CatalogError`.
    #[must_use]
    pub fn from_error(error: &CatalogError) -> Self {
        let response = Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
            details: None,
        };
        match error {
            CatalogError::Validation { fields, .. } if !fields.is_empty() => {
                response.with_details(fields.clone())
            }
            _ => response,
        }
    }

    /// Sets field-level validation errors.
    #[must_use]
    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&CatalogError> for ErrorResponse {
    fn from(error: &CatalogError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(CatalogError::not_found("Product", 1).status_code(), 404);
        assert_eq!(CatalogError::validation("price must be positive").status_code(), 400);
        assert_eq!(CatalogError::conflict("duplicate").status_code(), 409);
        assert_eq!(CatalogError::store("connection refused").status_code(), 500);
        assert_eq!(CatalogError::internal("oops").status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CatalogError::not_found("Product", 1).error_code(), "NOT_FOUND");
        assert_eq!(CatalogError::validation("bad").error_code(), "VALIDATION_ERROR");
        assert_eq!(CatalogError::store("down").error_code(), "STORE_UNAVAILABLE");
        assert_eq!(CatalogError::cache("down").error_code(), "CACHE_UNAVAILABLE");
        assert_eq!(
            CatalogError::Configuration("bad url".to_string()).error_code(),
            "CONFIGURATION_ERROR"
        );
        assert_eq!(CatalogError::internal("err").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_retriable_errors() {
        assert!(CatalogError::store("connection lost").is_retriable());
        assert!(CatalogError::cache("timeout").is_retriable());
        assert!(!CatalogError::not_found("Product", 1).is_retriable());
        assert!(!CatalogError::validation("bad input").is_retriable());
        assert!(!CatalogError::conflict("dup").is_retriable());
    }

    #[test]
    fn test_is_not_found() {
        assert!(CatalogError::not_found("Product", "abc").is_not_found());
        assert!(!CatalogError::store("down").is_not_found());
    }

    #[test]
    fn test_error_constructors() {
        let not_found = CatalogError::not_found("Product", "123");
        assert!(not_found.to_string().contains("Product"));
        assert!(not_found.to_string().contains("123"));

        let validation = CatalogError::validation("invalid field");
        assert!(validation.to_string().contains("invalid field"));

        let store = CatalogError::store("pool timed out");
        assert!(store.to_string().contains("pool timed out"));
    }

    #[test]
    fn test_json_error_maps_to_internal() {
        let err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let mapped = CatalogError::from(err);
        assert!(matches!(mapped, CatalogError::Internal(_)));
    }

    #[test]
    fn test_error_response_from_error() {
        let err = CatalogError::not_found("Product", 1);
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "NOT_FOUND");
        assert!(!response.message.is_empty());
        assert!(response.details.is_none());
    }

    #[test]
    fn test_error_response_carries_field_errors() {
        let err = CatalogError::Validation {
            message: "price: Price must be greater than 0".to_string(),
            fields: vec![FieldError {
                field: "price".to_string(),
                message: "Price must be greater than 0".to_string(),
                code: "positive_price".to_string(),
            }],
        };
        let response = ErrorResponse::from_error(&err);
        let details = response.details.unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].field, "price");

        let plain = ErrorResponse::from_error(&CatalogError::validation("Invalid product id"));
        assert!(plain.details.is_none());
    }
}
