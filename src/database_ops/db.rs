use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};
use sqlx::{ConnectOptions, Connection, SqliteConnection};
use std::str::FromStr;
use tracing::{debug, instrument, warn};

use crate::catalog::error::{CatalogError, Result};
use crate::catalog::{load_snapshot, CatalogSnapshot, QueryDescriptor};

/// Read access to the catalog as seen by request handlers.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn snapshot(&self, descriptor: &QueryDescriptor) -> Result<CatalogSnapshot>;

    /// Whether a connection can currently be opened.
    async fn ping(&self) -> bool;
}

/// Handle to the SQLite catalog file.
///
/// Holds only connect options; every operation opens its own connection and
/// closes it before returning.
#[derive(Clone, Debug)]
pub struct Db {
    options: SqliteConnectOptions,
}

impl Db {
    /// Serving handle: the file must exist and is opened read-only.
    // SECURITY: never include raw DSNs in tracing spans.
    #[instrument(skip(database_url))]
    pub fn read_only(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(CatalogError::StoreUnavailable)?
            .read_only(true);
        Ok(Self { options })
    }

    /// Admin handle: creates the file when missing and allows writes.
    #[instrument(skip(database_url))]
    pub fn writable(database_url: &str) -> Result<Self> {
        // Rollback journal keeps the file openable by read-only handles.
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(CatalogError::StoreUnavailable)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Delete);
        Ok(Self { options })
    }

    pub async fn acquire(&self) -> Result<SqliteConnection> {
        self.options
            .connect()
            .await
            .map_err(CatalogError::StoreUnavailable)
    }

    /// Closes a connection obtained from [`Db::acquire`]. A failed close is
    /// logged; the connection is gone either way.
    pub async fn release(&self, conn: SqliteConnection) {
        if let Err(err) = conn.close().await {
            warn!(target = "db", error = %err, "closing catalog connection failed");
        }
    }
}

#[async_trait]
impl CatalogStore for Db {
    async fn snapshot(&self, descriptor: &QueryDescriptor) -> Result<CatalogSnapshot> {
        let mut conn = self.acquire().await?;
        let result = load_snapshot(&mut conn, descriptor).await;
        self.release(conn).await;
        result
    }

    async fn ping(&self) -> bool {
        match self.acquire().await {
            Ok(mut conn) => {
                let alive = conn.ping().await.is_ok();
                self.release(conn).await;
                alive
            }
            Err(err) => {
                debug!(target = "db", error = %err, "catalog ping failed");
                false
            }
        }
    }
}
