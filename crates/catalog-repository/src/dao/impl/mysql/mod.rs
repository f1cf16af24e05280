//! MySQL DAO implementations.

mod product_dao_impl;

pub use product_dao_impl::MySqlProductDaoImpl;
