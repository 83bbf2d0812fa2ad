use actix_web::{web, HttpResponse, Responder};

use super::AppState;
use crate::models::HealthResponse;
use crate::services::ProfileSource;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = state.inquiries.health_check().await.unwrap_or(false);
    let datastore_healthy = match state.directory.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!("Datastore health check failed: {}", e);
            false
        }
    };
    let cache = state.cache.stats();

    let status = if db_healthy && datastore_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        database: db_healthy,
        datastore: datastore_healthy,
        redis_enabled: cache.redis_enabled,
    })
}
