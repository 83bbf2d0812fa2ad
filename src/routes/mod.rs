// Route exports
pub mod health;
pub mod leads;
pub mod pages;
pub mod reveals;
pub mod sitemap;

use actix_web::{web, HttpResponse};
use std::sync::Arc;

use crate::core::{LeadDistributor, RouteResolver, SiteInfo};
use crate::models::ErrorResponse;
use crate::registry::Registries;
use crate::services::{CacheManager, ContentService, DirectoryService, InquiryStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub registries: Arc<Registries>,
    pub site: Arc<SiteInfo>,
    pub resolver: Arc<RouteResolver>,
    pub directory: Arc<DirectoryService>,
    pub content: Arc<ContentService>,
    pub distributor: Arc<LeadDistributor>,
    pub inquiries: Arc<dyn InquiryStore>,
    pub cache: Arc<CacheManager>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(health::configure)
            .configure(leads::configure)
            .configure(reveals::configure),
    )
    .configure(sitemap::configure)
    .configure(pages::configure);
}

/// 503 for a listing the datastore could not serve
pub(crate) fn directory_unavailable(context: &str, err: impl std::fmt::Display) -> HttpResponse {
    tracing::warn!("Directory listing failed for {}: {}", context, err);
    HttpResponse::ServiceUnavailable().json(
        ErrorResponse::new(
            "directory_unavailable",
            "Counselor listings are temporarily unavailable",
            503,
        )
        .retryable(),
    )
}

pub(crate) fn not_found(message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new("not_found", message, 404))
}

pub(crate) fn bad_request(error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(error, message, 400))
}
