use serde::Serialize;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Row, Sqlite, SqliteConnection};
use tracing::debug;

use super::error::{CatalogError, Result};
use super::query::{BindArg, PageQuery};

/// One catalog row as shown on a page.
///
/// `display_id` is a page position, not the storage key: it is always
/// `start_index + position + 1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub display_id: u64,
    pub name: String,
    pub url: String,
    pub image_url: String,
    pub title: String,
    pub rating: f64,
    pub review_count: u32,
    pub sales_count: u32,
    pub price: f64,
    pub used_price: f64,
    pub savings: f64,
    pub region: String,
    pub last_updated: String,
}

/// Executes a page query and decodes its rows in query order.
pub async fn fetch_page(
    conn: &mut SqliteConnection,
    query: &PageQuery,
    start_index: u32,
) -> Result<Vec<Product>> {
    let mut q = sqlx::query::<Sqlite>(&query.sql);
    for arg in &query.args {
        q = bind_arg(q, arg);
    }

    let rows = q
        .fetch_all(&mut *conn)
        .await
        .map_err(CatalogError::QueryExecution)?;
    debug!(target = "catalog", rows = rows.len(), start_index, "page query returned");

    rows.iter()
        .enumerate()
        .map(|(position, row)| decode_product(row, display_id(start_index, position)))
        .collect()
}

fn bind_arg<'q>(
    q: sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>,
    arg: &BindArg,
) -> sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>> {
    match arg {
        BindArg::Text(text) => q.bind(text.clone()),
        BindArg::Int(value) => q.bind(*value),
    }
}

pub(crate) fn display_id(start_index: u32, position: usize) -> u64 {
    u64::from(start_index) + position as u64 + 1
}

fn decode_product(row: &SqliteRow, display_id: u64) -> Result<Product> {
    if row.len() != 13 {
        return Err(CatalogError::decode(
            "*",
            format!("expected 13 columns, got {}", row.len()),
        ));
    }

    // Column 0 is the storage key; decoded only to validate the row shape.
    let _storage_id: i64 = get(row, 0, "id")?;

    Ok(Product {
        display_id,
        name: text(row, 1, "name")?,
        url: text(row, 2, "url")?,
        image_url: text(row, 3, "imgUrl")?,
        title: text(row, 4, "title")?,
        rating: real(row, 5, "rating")?,
        review_count: count(row, 6, "reviews")?,
        sales_count: count(row, 7, "sales")?,
        price: real(row, 8, "price")?,
        used_price: real(row, 9, "usedPrice")?,
        savings: real(row, 10, "save")?,
        region: text(row, 11, "region")?,
        last_updated: text(row, 12, "timestamp")?,
    })
}

fn get<'r, T>(row: &'r SqliteRow, index: usize, column: &'static str) -> Result<T>
where
    T: sqlx::Decode<'r, Sqlite> + sqlx::Type<Sqlite>,
{
    row.try_get(index)
        .map_err(|err| CatalogError::decode(column, err))
}

// Nullable columns decode to their zero value.
fn text(row: &SqliteRow, index: usize, column: &'static str) -> Result<String> {
    Ok(get::<Option<String>>(row, index, column)?.unwrap_or_default())
}

fn real(row: &SqliteRow, index: usize, column: &'static str) -> Result<f64> {
    Ok(get::<Option<f64>>(row, index, column)?.unwrap_or_default())
}

fn count(row: &SqliteRow, index: usize, column: &'static str) -> Result<u32> {
    let raw = get::<Option<i64>>(row, index, column)?.unwrap_or_default();
    u32::try_from(raw).map_err(|_| CatalogError::decode(column, format!("out of range: {raw}")))
}
