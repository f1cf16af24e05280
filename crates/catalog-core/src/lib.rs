//! # Catalog Core
//!
//! Core types, traits, and error definitions for Catalog Cloud.
//! This crate provides the foundational abstractions used across all layers
//! of the workspace: the error taxonomy, typed ids, pagination, the
//! `Product` entity and validation helpers.

pub mod domain;
pub mod error;
pub mod id;
pub mod pagination;
pub mod result;
pub mod traits;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use pagination::*;
pub use result::*;
pub use traits::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
