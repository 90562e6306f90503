use anyhow::{Context, Result};
use catalog_page::catalog::ingest::{ensure_schema, import_listings, ScrapedListing};
use catalog_page::catalog::metadata::{format_display, latest_timestamp, total_count};
use catalog_page::catalog::{CatalogError, QueryDescriptor, RawParams};
use catalog_page::database_ops::{CatalogStore, Db};
use catalog_page::tracing::{init_tracing, DEFAULT_FILTER};
use catalog_page::util::env as env_util;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "catalog", version, about = "Product catalog admin CLI")]
struct Cli {
    /// Override the catalog database URL (defaults to CATALOG_DB_URL / DATABASE_URL)
    #[arg(long, global = true)]
    db_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "kebab-case")]
enum Commands {
    /// Print one catalog page as JSON, exactly as the API would serve it
    Page {
        /// Space-separated name fragments; all must match
        #[arg(long)]
        search: Option<String>,
        /// One of: "rating desc", "reviews desc", "sales desc", "price asc", "usedPrice asc", "save desc"
        #[arg(long)]
        order: Option<String>,
        /// Page start; malformed values mean 0
        #[arg(long)]
        offset: Option<String>,
    },
    /// Create the products table and name index if missing
    InitDb,
    /// Upsert scraped listings from a JSON array file
    Import {
        /// Path to a JSON file holding an array of listings
        file: PathBuf,
    },
    /// Print total catalog size and freshness
    Counts,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_util::init_env();
    init_tracing(DEFAULT_FILTER)?;

    let cli = Cli::parse();
    let db_url = cli.db_url.unwrap_or_else(env_util::db_url);

    match cli.command {
        Commands::Page {
            search,
            order,
            offset,
        } => {
            let db = Db::read_only(&db_url)?;
            let raw = RawParams {
                search,
                order,
                offset,
            };
            let snapshot = db.snapshot(&QueryDescriptor::from_raw(&raw)).await?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Commands::InitDb => {
            let db = Db::writable(&db_url)?;
            let mut conn = db.acquire().await?;
            let result = ensure_schema(&mut conn).await;
            db.release(conn).await;
            result?;
            info!("products schema ready");
        }
        Commands::Import { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let scraped: Vec<ScrapedListing> = serde_json::from_str(&raw)
                .with_context(|| format!("parsing {}", file.display()))?;

            let db = Db::writable(&db_url)?;
            let mut conn = db.acquire().await?;
            let result = import_listings(&mut conn, &scraped).await;
            db.release(conn).await;
            let summary = result?;
            println!(
                "imported {} listings, skipped {} ({} rows affected)",
                summary.imported, summary.skipped, summary.rows_affected
            );
        }
        Commands::Counts => {
            let db = Db::read_only(&db_url)?;
            let mut conn = db.acquire().await?;
            let result = async {
                let count = total_count(&mut conn).await?;
                let latest = latest_timestamp(&mut conn).await?;
                Ok::<_, CatalogError>((count, latest))
            }
            .await;
            db.release(conn).await;
            let (count, latest) = result?;
            println!("products: {count}");
            println!(
                "last updated: {}",
                latest.as_ref().map(format_display).unwrap_or_else(|| "-".into())
            );
        }
    }

    Ok(())
}
