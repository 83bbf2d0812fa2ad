use actix_web::{web, HttpResponse, Responder};
use futures::future::join_all;
use std::collections::HashMap;

use super::AppState;
use crate::core::sitemap::{anchor_city_entries, core_pages, render_index, render_urlset, SITEMAP_FILES};

const XML_CONTENT_TYPE: &str = "application/xml; charset=utf-8";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/sitemap.xml", web::get().to(sitemap_index))
        .route("/sitemap-core.xml", web::get().to(core_sitemap))
        .route("/sitemap-cities.xml", web::get().to(cities_sitemap));
}

fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

fn xml(body: String) -> HttpResponse {
    HttpResponse::Ok().content_type(XML_CONTENT_TYPE).body(body)
}

async fn sitemap_index(state: web::Data<AppState>) -> impl Responder {
    xml(render_index(&state.site.url, &SITEMAP_FILES, today()))
}

async fn core_sitemap(state: web::Data<AppState>) -> impl Responder {
    xml(render_urlset(&state.site.url, &core_pages(), today()))
}

async fn cities_sitemap(state: web::Data<AppState>) -> impl Responder {
    let counts = anchor_profile_counts(&state).await;
    let entries = anchor_city_entries(&state.registries.locations, counts.as_ref());

    xml(render_urlset(&state.site.url, &entries, today()))
}

/// Listed profiles per anchor city; `None` if any count is unavailable
async fn anchor_profile_counts(state: &AppState) -> Option<HashMap<(String, String), usize>> {
    let locations = &state.registries.locations;

    let lookups = locations.anchor_cities().filter_map(|city| {
        let abbr = locations.state(&city.state_slug)?.abbr.clone();
        Some(async move {
            let count = state.directory.count_in(&abbr, Some(&city.name)).await;
            ((city.state_slug.clone(), city.slug.clone()), count)
        })
    });

    let mut counts = HashMap::new();
    for (key, count) in join_all(lookups).await {
        match count {
            Ok(count) => {
                counts.insert(key, count);
            }
            Err(e) => {
                tracing::warn!("Profile counts unavailable, using default sitemap priorities: {}", e);
                return None;
            }
        }
    }

    Some(counts)
}
