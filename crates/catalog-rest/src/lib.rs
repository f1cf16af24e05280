//! # Catalog REST
//!
//! HTTP surface for Catalog Cloud: product CRUD under `/api/v1/products`,
//! health checks and the OpenAPI document.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
