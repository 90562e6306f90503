//! Write side of the catalog: schema bootstrap and listing upserts.
//!
//! The page core only ever reads; these helpers back the admin CLI and
//! test fixtures.

use serde::Deserialize;
use sqlx::{Connection, SqliteConnection};
use tracing::{debug, info, warn};

use super::error::{CatalogError, Result};

const CREATE_PRODUCTS: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY,
    name TEXT UNIQUE,
    url TEXT,
    imgUrl TEXT,
    title TEXT,
    rating REAL DEFAULT 0,
    reviews INTEGER DEFAULT 0,
    sales INTEGER DEFAULT 0,
    price REAL,
    usedPrice REAL DEFAULT 0,
    save REAL DEFAULT 0,
    region TEXT,
    timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
)
"#;

const CREATE_NAME_INDEX: &str = "CREATE INDEX IF NOT EXISTS search ON products(name)";

const UPSERT_PRODUCT: &str = r#"
INSERT INTO products(name, url, imgUrl, title, rating, reviews, sales, price, usedPrice, save, region)
VALUES(?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
ON CONFLICT(name)
DO UPDATE SET
    rating = excluded.rating,
    reviews = excluded.reviews,
    sales = excluded.sales,
    price = excluded.price,
    usedPrice = excluded.usedPrice,
    save = excluded.save,
    timestamp = CURRENT_TIMESTAMP
"#;

/// Scraped offer as found on a listing page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedListing {
    pub url: String,
    #[serde(default)]
    pub image_url: String,
    pub title: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: u32,
    #[serde(default)]
    pub sales: u32,
    pub price: f64,
    /// Falls back to `price` when no used offer exists.
    #[serde(default)]
    pub used_price: Option<f64>,
}

/// Listing ready for storage, with the derived columns filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub name: String,
    pub url: String,
    pub image_url: String,
    pub title: String,
    pub rating: f64,
    pub reviews: u32,
    pub sales: u32,
    pub price: f64,
    pub used_price: f64,
    pub save: f64,
    pub region: String,
}

impl Listing {
    /// Derives the storage row. Returns `None` for offers that are not
    /// listable: no price, sponsored (`sspa`) links, or no region.
    pub fn derive(raw: &ScrapedListing) -> Option<Self> {
        let url = raw.url.split('?').next().unwrap_or_default().to_owned();
        let region = region_of(&url);
        if raw.price == 0.0 || !raw.price.is_finite() || url.contains("sspa") || region.is_empty() {
            return None;
        }

        let used_price = raw.used_price.unwrap_or(raw.price);
        Some(Self {
            name: name_key(&raw.title),
            image_url: raw.image_url.clone(),
            title: raw.title.clone(),
            rating: raw.rating,
            reviews: raw.reviews,
            sales: raw.sales,
            price: raw.price,
            used_price,
            save: savings_percent(raw.price, used_price),
            region,
            url,
        })
    }
}

/// Dedup key: word characters of the title, lowercased.
pub fn name_key(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Top-level domain of a store URL (`https://www.amazon.de/dp/x` -> `de`).
pub fn region_of(url: &str) -> String {
    url.rsplit('.')
        .next()
        .and_then(|tail| tail.split('/').next())
        .unwrap_or_default()
        .to_owned()
}

/// Discount of the used offer over the new one, in percent, two decimals.
pub fn savings_percent(price: f64, used_price: f64) -> f64 {
    (((price - used_price) / price) * 100.0 * 100.0).round() / 100.0
}

pub async fn ensure_schema(conn: &mut SqliteConnection) -> Result<()> {
    for ddl in [CREATE_PRODUCTS, CREATE_NAME_INDEX] {
        sqlx::query(ddl)
            .execute(&mut *conn)
            .await
            .map_err(CatalogError::QueryExecution)?;
    }
    debug!(target = "catalog::ingest", "products schema ensured");
    Ok(())
}

/// Inserts or refreshes listings keyed by `name`, in one transaction.
pub async fn upsert_listings(conn: &mut SqliteConnection, listings: &[Listing]) -> Result<u64> {
    let mut tx = conn.begin().await.map_err(CatalogError::QueryExecution)?;
    let mut affected = 0;
    for listing in listings {
        affected += sqlx::query(UPSERT_PRODUCT)
            .bind(&listing.name)
            .bind(&listing.url)
            .bind(&listing.image_url)
            .bind(&listing.title)
            .bind(listing.rating)
            .bind(listing.reviews)
            .bind(listing.sales)
            .bind(listing.price)
            .bind(listing.used_price)
            .bind(listing.save)
            .bind(&listing.region)
            .execute(&mut *tx)
            .await
            .map_err(CatalogError::QueryExecution)?
            .rows_affected();
    }
    tx.commit().await.map_err(CatalogError::QueryExecution)?;
    info!(target = "catalog::ingest", listings = listings.len(), affected, "listings upserted");
    Ok(affected)
}

/// Outcome of [`import_listings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    /// Listable offers written to the catalog.
    pub imported: usize,
    /// Offers dropped by [`Listing::derive`].
    pub skipped: usize,
    pub rows_affected: u64,
}

/// Derives storage rows from scraped offers, drops the unlistable ones,
/// ensures the schema and upserts the rest.
pub async fn import_listings(
    conn: &mut SqliteConnection,
    scraped: &[ScrapedListing],
) -> Result<ImportSummary> {
    let listings: Vec<Listing> = scraped.iter().filter_map(Listing::derive).collect();
    let skipped = scraped.len() - listings.len();
    if skipped > 0 {
        warn!(target = "catalog::ingest", skipped, "skipping unlistable offers");
    }

    ensure_schema(conn).await?;
    let rows_affected = upsert_listings(conn, &listings).await?;

    Ok(ImportSummary {
        imported: listings.len(),
        skipped,
        rows_affected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scraped(url: &str, title: &str, price: f64, used: Option<f64>) -> ScrapedListing {
        ScrapedListing {
            url: url.into(),
            title: title.into(),
            price,
            used_price: used,
            ..Default::default()
        }
    }

    #[test]
    fn derives_name_region_and_savings() {
        let listing = Listing::derive(&scraped(
            "https://www.amazon.de/dp/B0ABC?ref=sr_1",
            "Acme Foo-Bar 27\" Monitor!",
            200.0,
            Some(150.0),
        ))
        .unwrap();
        assert_eq!(listing.url, "https://www.amazon.de/dp/B0ABC");
        assert_eq!(listing.name, "acmefoobar27monitor");
        assert_eq!(listing.region, "de");
        assert_eq!(listing.save, 25.0);
    }

    #[test]
    fn used_price_defaults_to_price() {
        let listing =
            Listing::derive(&scraped("https://www.amazon.com/dp/X", "Thing", 9.99, None)).unwrap();
        assert_eq!(listing.used_price, 9.99);
        assert_eq!(listing.save, 0.0);
    }

    #[test]
    fn rounds_savings_to_two_decimals() {
        assert_eq!(savings_percent(3.0, 2.0), 33.33);
    }

    #[test]
    fn skips_unlistable_offers() {
        assert!(Listing::derive(&scraped("https://www.amazon.fr/dp/X", "Free", 0.0, None)).is_none());
        assert!(Listing::derive(&scraped(
            "https://www.amazon.fr/sspa/click?x=1",
            "Sponsored",
            10.0,
            None
        ))
        .is_none());
        assert!(Listing::derive(&scraped("", "No url", 10.0, None)).is_none());
    }
}
