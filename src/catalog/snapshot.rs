use serde::Serialize;
use sqlx::SqliteConnection;
use tracing::{info, warn};

use super::error::{CatalogError, Result};
use super::materialize::{fetch_page, Product};
use super::metadata::{format_display, latest_timestamp, total_count};
use super::params::QueryDescriptor;
use super::query::build_page_query;

/// Payload handed to the renderer: one page plus catalog-wide metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    /// Size of the whole catalog, not of the filtered result.
    pub total_count: u64,
    /// `DD/MM/YYYY HH:MM:SS`, or empty when unknown.
    pub last_updated: String,
}

impl CatalogSnapshot {
    /// Stand-in served when the store cannot be reached and the caller opted
    /// into degradation.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Runs the page, count and freshness queries on one connection and
/// assembles the snapshot.
///
/// A stored timestamp that cannot be parsed leaves `last_updated` empty;
/// every other failure is returned.
pub async fn load_snapshot(
    conn: &mut SqliteConnection,
    descriptor: &QueryDescriptor,
) -> Result<CatalogSnapshot> {
    let query = build_page_query(descriptor);
    let products = fetch_page(conn, &query, descriptor.start_index).await?;
    let total_count = total_count(conn).await?;

    let last_updated = match latest_timestamp(conn).await {
        Ok(Some(ts)) => format_display(&ts),
        Ok(None) => String::new(),
        Err(err @ CatalogError::TimestampParse { .. }) => {
            warn!(target = "catalog", error = %err, "leaving lastUpdated empty");
            String::new()
        }
        Err(err) => return Err(err),
    };

    info!(
        target = "catalog",
        filtered = descriptor.has_filter(),
        terms = descriptor.search_terms.len(),
        order = descriptor.order.key(),
        offset = descriptor.offset,
        returned = products.len(),
        total_count,
        "catalog page loaded"
    );

    Ok(CatalogSnapshot {
        products,
        total_count,
        last_updated,
    })
}
