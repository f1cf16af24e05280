//! # Catalog Server Library
//!
//! Dependency injection wiring and startup utilities for the Catalog Cloud
//! server binary.

pub mod di;
pub mod startup;
