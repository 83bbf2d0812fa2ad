use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use super::{bad_request, directory_unavailable, AppState};
use crate::core::distributor::{LeadError, LeadLocation};
use crate::core::slug::slugify;
use crate::models::{ErrorResponse, InquirySubmission};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/inquiries", web::post().to(submit_inquiry));
}

/// Submit a couple's inquiry from a city page
///
/// POST /api/v1/inquiries
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "email": "string",
///   "message": "string",
///   "preferredType": "either|therapist|clergy",
///   "state": "texas",
///   "city": "austin"
/// }
/// ```
async fn submit_inquiry(state: web::Data<AppState>, req: web::Json<InquirySubmission>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for inquiry: field_errors={:?}", errors);
        return bad_request("Validation failed", errors.to_string());
    }

    let submission = req.into_inner();
    let locations = &state.registries.locations;

    let Some(state_info) = locations.state(&slugify(&submission.state)) else {
        return bad_request("invalid_location", format!("Unknown state: {}", submission.state));
    };
    let city_slug = slugify(&submission.city);
    let location = LeadLocation {
        state_slug: state_info.slug.clone(),
        state_name: state_info.name.clone(),
        city_name: locations.city_display_name(&state_info.slug, &city_slug),
        city_slug,
    };

    tracing::info!(
        "Inquiry for {} professionals in {}, {}",
        submission.preferred_type.as_str(),
        location.city_name,
        state_info.abbr
    );

    let pool = match state
        .directory
        .profiles_in(&state_info.abbr, Some(&location.city_name))
        .await
    {
        Ok(pool) => pool,
        Err(e) => return directory_unavailable(&location.city_name, e),
    };

    match state.distributor.distribute(&submission, &location, pool).await {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(LeadError::NoMatchingProfessionals) => HttpResponse::UnprocessableEntity().json(ErrorResponse::new(
            "no_matching_professionals",
            LeadError::NoMatchingProfessionals.to_string(),
            422,
        )),
        Err(e @ LeadError::Persistence(_)) => {
            tracing::error!("Inquiry for {} not stored: {}", location.city_name, e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "inquiry_not_stored",
                "Failed to submit inquiry",
                500,
            ))
        }
    }
}
