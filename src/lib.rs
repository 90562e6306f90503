//! Paginated, filterable product catalog page.
//!
//! [`catalog`] turns untrusted request parameters into a parameterized SQLite
//! query, materializes one page with continuous display ids, and attaches
//! catalog-wide metadata. [`database_ops`] owns the store handle, [`api`]
//! exposes the snapshot over HTTP.

pub mod api;
pub mod catalog;
pub mod database_ops;
pub mod tracing;

pub mod util {
    pub mod env;
}
