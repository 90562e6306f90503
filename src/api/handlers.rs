// HTTP request handlers for API endpoints

use crate::api::models::*;
use crate::catalog::{CatalogError, CatalogSnapshot, QueryDescriptor, RawParams};
use crate::database_ops::CatalogStore;
use actix_web::{http::StatusCode, web, HttpResponse, Result};
use std::sync::Arc;
use std::time::Instant;

/// Shared, immutable per-server state.
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
    /// Serve an empty page instead of failing when the store is unreachable.
    pub degrade_on_unavailable: bool,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(store: Arc<dyn CatalogStore>, degrade_on_unavailable: bool) -> Self {
        Self {
            store,
            degrade_on_unavailable,
            started_at: Instant::now(),
        }
    }
}

/// Health check endpoint
pub async fn health_check(state: web::Data<AppState>) -> Result<HttpResponse> {
    let db_status = if state.store.ping().await {
        "connected"
    } else {
        "disconnected"
    };

    let response = ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        database: db_status.to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    });

    Ok(HttpResponse::Ok().json(response))
}

/// One catalog page plus catalog-wide metadata.
///
/// Parameters are read as raw pairs so repeated or unexpected keys never
/// reject the request.
pub async fn catalog_page(
    query: web::Query<Vec<(String, String)>>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let descriptor = QueryDescriptor::from_raw(&RawParams::from_pairs(query.into_inner()));

    match state.store.snapshot(&descriptor).await {
        Ok(snapshot) => Ok(HttpResponse::Ok().json(ApiResponse::success(snapshot))),
        Err(err) if err.is_store_unavailable() && state.degrade_on_unavailable => {
            tracing::warn!(error = %err, "catalog store unavailable; serving empty page");
            Ok(HttpResponse::Ok().json(ApiResponse::degraded(CatalogSnapshot::empty())))
        }
        Err(err) => {
            tracing::error!(error = %err, code = err.code(), "catalog page failed");
            Ok(HttpResponse::build(status_for(&err))
                .json(ApiResponse::<()>::error(err.code(), err.to_string())))
        }
    }
}

fn status_for(err: &CatalogError) -> StatusCode {
    match err {
        CatalogError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
