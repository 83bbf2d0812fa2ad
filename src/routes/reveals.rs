use actix_web::{http::header, web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

use super::{bad_request, AppState};
use crate::models::{ContactReveal, ContactRevealRequest, ContactRevealResponse, ErrorResponse};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/contact-reveals", web::post().to(record_reveal))
        .route("/contact-reveals/{profile_id}/stats", web::get().to(reveal_stats));
}

/// Record that a visitor revealed a professional's contact detail
///
/// POST /api/v1/contact-reveals
async fn record_reveal(
    state: web::Data<AppState>,
    req: web::Json<ContactRevealRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let req = req.into_inner();
    let user_agent = http_req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let reveal = ContactReveal {
        profile_id: req.profile_id,
        reveal_type: req.reveal_type,
        session_id: req.session_id,
        user_agent,
        city: req.city,
        state_province: req.state_province,
        created_at: chrono::Utc::now(),
    };

    match state.inquiries.record_contact_reveal(&reveal).await {
        Ok(()) => HttpResponse::Created().json(ContactRevealResponse {
            success: true,
            profile_id: reveal.profile_id,
            reveal_type: reveal.reveal_type.as_str().to_string(),
        }),
        Err(e) => {
            tracing::error!("Failed to record contact reveal for {}: {}", reveal.profile_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Failed to record contact reveal",
                e.to_string(),
                500,
            ))
        }
    }
}

/// GET /api/v1/contact-reveals/{profile_id}/stats
async fn reveal_stats(state: web::Data<AppState>, profile_id: web::Path<String>) -> impl Responder {
    match state.inquiries.reveal_stats(&profile_id).await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => {
            tracing::error!("Failed to load reveal stats for {}: {}", profile_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Failed to load reveal stats",
                e.to_string(),
                500,
            ))
        }
    }
}
