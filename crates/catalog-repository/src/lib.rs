//! # Catalog Repository
//!
//! The record store. Layered data access:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn ProductRepository>  (domain interface)
//! ProductRepositoryImpl            (repository impl)
//!   ↓  Arc<dyn ProductDao>         (DAO interface)
//! MySqlProductDaoImpl              (DAO impl, MySQL / SQLx)
//!   ↓
//! MySQL
//! ```
//!
//! [`InMemoryProductDao`] stands in for MySQL where no database is at hand.

pub mod dao;
pub mod pool;
pub mod traits;
pub mod r#impl;

pub use dao::{InMemoryProductDao, MySqlProductDaoImpl, ProductDao};
pub use pool::*;
pub use r#impl::ProductRepositoryImpl;
pub use traits::*;
