//! Result type aliases for Catalog Cloud.

use crate::CatalogError;

/// A specialized `Result` type for Catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
