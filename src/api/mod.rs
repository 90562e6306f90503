// HTTP surface for the catalog page: JSON snapshot and health endpoints.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;

pub use server::ApiServer;
