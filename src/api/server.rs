// API server implementation using actix-web

use crate::api::handlers::AppState;
use crate::api::{middleware, routes};
use crate::database_ops::CatalogStore;
use crate::util::env as env_util;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use std::sync::Arc;

pub struct ApiServer {
    pub host: String,
    pub port: u16,
    pub allowed_origins: String,
    pub degrade_on_unavailable: bool,
}

impl ApiServer {
    /// Create server from environment variables
    pub fn from_env() -> Result<Self> {
        env_util::init_env();

        let host = env_util::env_opt("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = env_util::env_opt("API_PORT")
            .unwrap_or_else(|| "8080".to_string())
            .trim()
            .parse()
            .context("Invalid API_PORT")?;

        let allowed_origins = env_util::env_opt("ALLOWED_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000,http://localhost:8000".to_string());

        let degrade_on_unavailable = env_util::env_flag("CATALOG_DEGRADE_ON_UNAVAILABLE", true);

        Ok(Self {
            host,
            port,
            allowed_origins,
            degrade_on_unavailable,
        })
    }

    /// Start the HTTP server
    pub async fn run(self, store: Arc<dyn CatalogStore>) -> Result<()> {
        let bind_addr = format!("{}:{}", self.host, self.port);

        tracing::info!(
            host = %self.host,
            port = %self.port,
            degrade_on_unavailable = self.degrade_on_unavailable,
            "Starting catalog API server"
        );

        let state = web::Data::new(AppState::new(store, self.degrade_on_unavailable));
        let allowed_origins = self.allowed_origins.clone();

        HttpServer::new(move || {
            let (logger, compress) = middleware::setup_middleware();
            let cors = middleware::setup_cors(&allowed_origins);

            App::new()
                .app_data(state.clone())
                .wrap(logger)
                .wrap(compress)
                .wrap(cors)
                .configure(routes::configure_routes)
        })
        .bind(&bind_addr)
        .with_context(|| format!("Failed to bind to {}", bind_addr))?
        .run()
        .await
        .context("HTTP server error")?;

        Ok(())
    }
}
