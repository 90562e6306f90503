// HTTP API server binary for the catalog page

use anyhow::{Context, Result};
use catalog_page::api::ApiServer;
use catalog_page::database_ops::{CatalogStore, Db};
use catalog_page::tracing::{init_tracing, DEFAULT_FILTER};
use catalog_page::util::env as env_util;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> Result<()> {
    env_util::init_env();
    init_tracing(DEFAULT_FILTER)?;

    tracing::info!("Initializing catalog API server");
    env_util::preflight_check(
        "api_server",
        &[
            "CATALOG_DB_URL",
            "DATABASE_URL",
            "API_HOST",
            "API_PORT",
            "ALLOWED_ORIGINS",
            "CATALOG_DEGRADE_ON_UNAVAILABLE",
        ],
    );

    let server = ApiServer::from_env()?;

    let database_url = env_util::db_url();
    let db = Db::read_only(&database_url).context("invalid catalog database URL")?;

    // Connections are per request; an unreachable file is only logged here.
    if !db.ping().await {
        tracing::warn!("catalog database not reachable at startup");
    }

    server.run(Arc::new(db)).await?;

    Ok(())
}
