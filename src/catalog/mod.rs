//! Catalog page core: request normalization, injection-safe query
//! construction, page materialization and catalog-wide metadata.

pub mod error;
pub mod ingest;
pub mod materialize;
pub mod metadata;
pub mod order;
pub mod params;
pub mod query;
pub mod snapshot;

pub use error::CatalogError;
pub use materialize::Product;
pub use order::SortOrder;
pub use params::{QueryDescriptor, RawParams};
pub use query::{build_page_query, BindArg, PageQuery, PAGE_SIZE};
pub use snapshot::{load_snapshot, CatalogSnapshot};
