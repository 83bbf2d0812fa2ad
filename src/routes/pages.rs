use actix_web::{http::header, web, HttpRequest, HttpResponse};
use serde::Serialize;

use super::{directory_unavailable, not_found, AppState};
use crate::core::indexing::{city_indexable, specialty_location_indexable, state_indexable};
use crate::core::router::{legacy_redirect, split_segments, Route};
use crate::core::seo::{
    assemble, city_list_entity, professional_entity, state_list_entity, Breadcrumb, PageSeo, SeoDocument,
};
use crate::models::{ContentKind, LocationContent, Profile};
use crate::registry::{CityInfo, CityRoute, Specialty, StateInfo};
use crate::services::{ContentError, ProfileSource};

/// Listings fetched for a nationwide specialty page
const SPECIALTY_NATIONWIDE_LIMIT: usize = 100;
const NEARBY_CITY_LIMIT: usize = 6;
const BIO_SNIPPET_CHARS: usize = 150;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/premarital-counseling", web::get().to(states_index))
        .route("/states", web::get().to(states_index))
        .route("/premarital-counseling/{tail:.*}", web::get().to(directory_page))
        .route("/states/{tail:.*}", web::get().to(state_directory_page))
        .route("/professionals", web::get().to(legacy_professionals))
        .route("/professionals/{tail:.*}", web::get().to(legacy_professionals));
}

/// Page model returned for every directory path
#[derive(Debug, Serialize)]
pub struct PageResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<Route>,
    pub indexable: bool,
    pub seo: SeoDocument,
    #[serde(flatten)]
    pub body: PageBody,
}

#[derive(Debug, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageBody {
    States {
        states: Vec<StateSummary>,
    },
    State {
        state: StateInfo,
        cities: Vec<CityRoute>,
        profiles: Vec<Profile>,
        content: Option<LocationContent>,
    },
    City {
        state: StateInfo,
        city_name: String,
        city: Option<CityInfo>,
        profiles: Vec<Profile>,
        nearby: Vec<CityRoute>,
        content: Option<LocationContent>,
    },
    Profile {
        profile: Profile,
    },
    Specialty {
        specialty: Specialty,
        state: Option<StateInfo>,
        city_name: Option<String>,
        cities: Vec<CityRoute>,
        profiles: Vec<Profile>,
    },
}

#[derive(Debug, Serialize)]
pub struct StateSummary {
    pub slug: String,
    pub name: String,
    pub abbr: String,
    pub city_count: usize,
    pub path: String,
}

/// GET /premarital-counseling/{segments...}
async fn directory_page(state: web::Data<AppState>, tail: web::Path<String>) -> HttpResponse {
    let segments = split_segments(&tail);
    render(&state, &segments).await
}

/// GET /states/{state}[/...]
///
/// Same pages as the directory paths, minus the specialty branch.
async fn state_directory_page(state: web::Data<AppState>, tail: web::Path<String>) -> HttpResponse {
    let segments = split_segments(&tail);

    match segments.first() {
        Some(first) if !state.registries.specialties.is_specialty(first) => render(&state, &segments).await,
        _ => not_found("Unknown state"),
    }
}

/// GET /professionals[/...] -> 308 to /states[/...]
async fn legacy_professionals(req: HttpRequest) -> HttpResponse {
    match legacy_redirect(req.path()) {
        Some(target) => HttpResponse::PermanentRedirect()
            .insert_header((header::LOCATION, target))
            .finish(),
        None => not_found("Page not found"),
    }
}

async fn states_index(state: web::Data<AppState>) -> HttpResponse {
    let states: Vec<StateSummary> = state
        .registries
        .locations
        .states()
        .iter()
        .map(|s| StateSummary {
            slug: s.slug.clone(),
            name: s.name.clone(),
            abbr: s.abbr.clone(),
            city_count: s.major_cities.len(),
            path: format!("/premarital-counseling/{}", s.slug),
        })
        .collect();

    let seo = PageSeo {
        title: Some("Premarital Counseling by State".to_string()),
        description: Some(
            "Browse premarital counselors, therapists and clergy in all 50 states. Find marriage preparation near you."
                .to_string(),
        ),
        path: "/states".to_string(),
        breadcrumbs: vec![Breadcrumb::new("Home", Some("/")), Breadcrumb::new("States", None)],
        ..PageSeo::default()
    };

    respond(&state, None, seo, true, PageBody::States { states })
}

/// Resolve segments and build the matching page
pub async fn render(app: &AppState, segments: &[String]) -> HttpResponse {
    let resolution = app.resolver.resolve(segments).await;
    tracing::debug!("Resolved /{} to {:?}", segments.join("/"), resolution.route);

    let route = resolution.route.clone();
    match resolution.route {
        Route::NotFound => not_found("Page not found"),
        Route::State { state } => state_page(app, route, &state).await,
        Route::City { state, city, .. } => city_page(app, route, &state, &city).await,
        Route::Profile { state, city, slug } => {
            profile_page(app, route, &state, city.as_deref(), &slug, resolution.profile).await
        }
        Route::Specialty { specialty } => specialty_page(app, route, &specialty, None, None).await,
        Route::SpecialtyState { specialty, state } => {
            specialty_page(app, route, &specialty, Some(&state), None).await
        }
        Route::SpecialtyCity { specialty, state, city } => {
            specialty_page(app, route, &specialty, Some(&state), Some(&city)).await
        }
    }
}

fn respond(app: &AppState, route: Option<Route>, mut seo: PageSeo, indexable: bool, body: PageBody) -> HttpResponse {
    seo.noindex = !indexable;
    let seo = assemble(&app.site, &seo);

    HttpResponse::Ok().json(PageResponse {
        route,
        indexable,
        seo,
        body,
    })
}

fn public(profiles: Vec<Profile>) -> Vec<Profile> {
    profiles.into_iter().map(Profile::public_view).collect()
}

/// Generated copy for a location; any failure leaves the page without it
async fn optional_content(
    app: &AppState,
    kind: ContentKind,
    state: &StateInfo,
    city: Option<&str>,
) -> Option<LocationContent> {
    match app.content.get_or_generate(kind, state, city).await {
        Ok(content) => Some(content),
        Err(ContentError::Disabled) => None,
        Err(e) => {
            tracing::warn!(
                "No {} content for {} {}: {}",
                kind.as_str(),
                state.name,
                city.unwrap_or_default(),
                e
            );
            None
        }
    }
}

/// Non-blank generated text
fn content_text(value: Option<&String>) -> Option<String> {
    value
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

async fn state_page(app: &AppState, route: Route, state_slug: &str) -> HttpResponse {
    let Some(info) = app.registries.locations.state(state_slug) else {
        return not_found("Unknown state");
    };

    let (profiles, content) = tokio::join!(
        app.directory.profiles_in(&info.abbr, None),
        optional_content(app, ContentKind::State, info, None),
    );
    let profiles = match profiles {
        Ok(profiles) => profiles,
        Err(e) => return directory_unavailable(&info.name, e),
    };

    let cities = app.registries.locations.city_routes(&info.slug);
    let indexable = state_indexable(info, content.as_ref());

    let seo = PageSeo {
        title: content_text(content.as_ref().and_then(|c| c.title.as_ref()))
            .or_else(|| Some(format!("Premarital Counseling in {} - Find Counselors", info.name))),
        description: content_text(content.as_ref().and_then(|c| c.description.as_ref())).or_else(|| {
            Some(format!(
                "Find premarital counseling in {}. Compare licensed therapists (LMFT, LPC, LCSW), Christian and faith-based counselors, clergy, and online options for engaged couples across {}+ cities.",
                info.name,
                info.major_cities.len()
            ))
        }),
        path: format!("/premarital-counseling/{}", info.slug),
        breadcrumbs: Breadcrumb::state_trail(&info.name, &info.slug),
        structured_data: Some(state_list_entity(&info.name, &cities, &app.site.url)),
        ..PageSeo::default()
    };

    respond(
        app,
        Some(route),
        seo,
        indexable,
        PageBody::State {
            state: info.clone(),
            cities,
            profiles: public(profiles),
            content,
        },
    )
}

async fn city_page(app: &AppState, route: Route, state_slug: &str, city_slug: &str) -> HttpResponse {
    let locations = &app.registries.locations;
    let fallback_state;
    let (info, registered) = match locations.state(state_slug).or_else(|| locations.state_by_abbr(state_slug)) {
        Some(info) => (info, true),
        None => {
            fallback_state = StateInfo::unregistered(state_slug);
            (&fallback_state, false)
        }
    };
    let city_name = locations.city_display_name(&info.slug, city_slug);

    let (profiles, content) = tokio::join!(
        app.directory.profiles_in(&info.abbr, Some(&city_name)),
        async {
            if registered {
                optional_content(app, ContentKind::City, info, Some(city_slug)).await
            } else {
                None
            }
        },
    );
    let profiles = match profiles {
        Ok(profiles) => profiles,
        Err(e) => return directory_unavailable(&format!("{}, {}", city_name, info.abbr), e),
    };

    let indexable = registered && city_indexable(locations, &info.slug, city_slug, profiles.len());
    let nearby: Vec<CityRoute> = locations
        .city_routes(&info.slug)
        .into_iter()
        .filter(|r| r.city_slug != city_slug)
        .take(NEARBY_CITY_LIMIT)
        .collect();

    let seo = PageSeo {
        title: content_text(content.as_ref().and_then(|c| c.title.as_ref()))
            .or_else(|| Some(format!("Premarital Counseling in {}, {}", city_name, info.name))),
        description: content_text(content.as_ref().and_then(|c| c.description.as_ref())).or_else(|| {
            Some(format!(
                "Find the best premarital counselors in {}, {}. {}+ licensed therapists, coaches, and clergy specializing in marriage preparation and relationship counseling.",
                city_name,
                info.name,
                profiles.len()
            ))
        }),
        path: format!("/premarital-counseling/{}/{}", info.slug, city_slug),
        breadcrumbs: Breadcrumb::city_trail(&info.name, &info.slug, &city_name, city_slug),
        structured_data: Some(city_list_entity(&city_name, &info.name, &profiles)),
        ..PageSeo::default()
    };

    respond(
        app,
        Some(route),
        seo,
        indexable,
        PageBody::City {
            state: info.clone(),
            city: locations.city_info(&info.slug, city_slug).cloned(),
            city_name,
            profiles: public(profiles),
            nearby,
            content,
        },
    )
}

async fn profile_page(
    app: &AppState,
    route: Route,
    state_slug: &str,
    city_slug: Option<&str>,
    slug: &str,
    prefetched: Option<Profile>,
) -> HttpResponse {
    let profile = match prefetched {
        Some(profile) => profile,
        None => match app.directory.find_by_slug(slug).await {
            Ok(Some(profile)) => profile,
            Ok(None) => return not_found("Profile not found"),
            Err(e) => return directory_unavailable(slug, e),
        },
    };

    let locations = &app.registries.locations;
    let state_name = locations
        .state(state_slug)
        .or_else(|| locations.state_by_abbr(state_slug))
        .map(|s| s.name.clone())
        .unwrap_or_else(|| state_slug.to_string());

    let mut breadcrumbs = match city_slug {
        Some(city) => {
            let city_name = locations.city_display_name(state_slug, city);
            Breadcrumb::city_trail(&state_name, state_slug, &city_name, city)
        }
        None => Breadcrumb::state_trail(&state_name, state_slug),
    };
    breadcrumbs.push(Breadcrumb::new(profile.full_name.clone(), None));

    let path = match city_slug {
        Some(city) => format!("/premarital-counseling/{}/{}/{}", state_slug, city, slug),
        None => format!("/premarital-counseling/{}/{}", state_slug, slug),
    };

    let place = [profile.city.as_deref(), profile.state_province.as_deref()]
        .into_iter()
        .flatten()
        .filter(|s| !s.trim().is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    let bio: String = profile
        .bio
        .as_deref()
        .unwrap_or_default()
        .chars()
        .take(BIO_SNIPPET_CHARS)
        .collect();

    let seo = PageSeo {
        title: Some(format!("{} - {} in {}", profile.full_name, profile.profession_label(), place)),
        description: Some(format!(
            "Connect with {}, a qualified {} in {}. {}...",
            profile.full_name,
            profile.profession_label(),
            place,
            bio.trim()
        )),
        path,
        page_type: Some("profile".to_string()),
        image: profile.photo_url.clone(),
        structured_data: Some(professional_entity(&profile, &app.site)),
        breadcrumbs,
        reviews: profile.reviews.clone(),
        reviewed_name: Some(profile.full_name.clone()),
        ..PageSeo::default()
    };

    respond(
        app,
        Some(route),
        seo,
        true,
        PageBody::Profile {
            profile: profile.public_view(),
        },
    )
}

async fn specialty_page(
    app: &AppState,
    route: Route,
    specialty_slug: &str,
    state_slug: Option<&str>,
    city_slug: Option<&str>,
) -> HttpResponse {
    let locations = &app.registries.locations;
    let Some(specialty) = app.registries.specialties.by_slug(specialty_slug) else {
        return not_found("Unknown specialty");
    };
    let state = match state_slug {
        Some(slug) => match locations.state(slug) {
            Some(info) => Some(info),
            None => return not_found("Unknown state"),
        },
        None => None,
    };
    let city = match (state, city_slug) {
        (Some(info), Some(slug)) => Some((slug, locations.city_display_name(&info.slug, slug))),
        _ => None,
    };

    let profiles = match state {
        Some(info) => {
            app.directory
                .profiles_for_specialty(specialty, &info.abbr, city.as_ref().map(|(_, name)| name.as_str()))
                .await
        }
        None => {
            app.directory
                .specialty_nationwide(specialty, SPECIALTY_NATIONWIDE_LIMIT)
                .await
        }
    };
    let profiles = match profiles {
        Ok(profiles) => profiles,
        Err(e) => return directory_unavailable(&specialty.name, e),
    };

    let specialty_path = format!("/premarital-counseling/{}", specialty.slug);
    let mut breadcrumbs = vec![
        Breadcrumb::new("Home", Some("/")),
        Breadcrumb::new("Premarital Counseling", Some("/premarital-counseling")),
    ];

    let (title, description, path, indexable) = match (state, &city) {
        (None, _) => {
            breadcrumbs.push(Breadcrumb::new(specialty.name.clone(), None));
            (
                specialty.title.clone(),
                specialty.meta_description.clone(),
                specialty_path,
                true,
            )
        }
        (Some(info), None) => {
            breadcrumbs.push(Breadcrumb::new(specialty.name.clone(), Some(specialty_path.as_str())));
            breadcrumbs.push(Breadcrumb::new(info.name.clone(), None));
            let count = if profiles.is_empty() {
                "qualified".to_string()
            } else {
                profiles.len().to_string()
            };
            (
                format!("{} Premarital Counseling in {}", specialty.name, info.name),
                format!(
                    "Find {} premarital counselors in {}. Compare {} therapists and programs specializing in {} marriage preparation.",
                    specialty.name.to_lowercase(),
                    info.name,
                    count,
                    specialty.name
                ),
                format!("{}/{}", specialty_path, info.slug),
                specialty_location_indexable(profiles.len()),
            )
        }
        (Some(info), Some((slug, name))) => {
            let state_path = format!("{}/{}", specialty_path, info.slug);
            breadcrumbs.push(Breadcrumb::new(specialty.name.clone(), Some(specialty_path.as_str())));
            breadcrumbs.push(Breadcrumb::new(info.name.clone(), Some(state_path.as_str())));
            breadcrumbs.push(Breadcrumb::new(name.clone(), None));
            (
                format!("{} Premarital Counseling in {}, {}", specialty.name, name, info.abbr),
                format!(
                    "Find {} premarital counselors in {}, {}. Compare top rated therapists and programs for {} marriage preparation.",
                    specialty.name.to_lowercase(),
                    name,
                    info.abbr,
                    specialty.name
                ),
                format!("{}/{}", state_path, slug),
                specialty_location_indexable(profiles.len()),
            )
        }
    };

    let seo = PageSeo {
        title: Some(title),
        description: Some(description),
        path,
        keywords: specialty.keywords.clone(),
        breadcrumbs,
        faqs: specialty.faqs.clone(),
        ..PageSeo::default()
    };

    let cities = match (state, &city) {
        (Some(info), None) => locations.city_routes(&info.slug),
        _ => Vec::new(),
    };

    respond(
        app,
        Some(route),
        seo,
        indexable,
        PageBody::Specialty {
            specialty: specialty.clone(),
            state: state.cloned(),
            city_name: city.map(|(_, name)| name),
            cities,
            profiles: public(profiles),
        },
    )
}
