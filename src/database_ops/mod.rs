pub mod db;

pub use db::{CatalogStore, Db};
