// API route configuration

use crate::api::handlers;
use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health_check))
        // The page the renderer asks for; same payload as the versioned route.
        .route("/", web::get().to(handlers::catalog_page))
        .service(web::scope("/api/v1").route("/catalog", web::get().to(handlers::catalog_page)));
}
