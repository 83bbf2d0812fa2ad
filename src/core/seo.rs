use crate::core::slug::canonical_path;
use crate::models::{Profile, Review};
use crate::registry::{CityRoute, Faq};
use serde::Serialize;
use serde_json::{json, Map, Value};

pub const SCHEMA_CONTEXT: &str = "https://schema.org";
pub const DEFAULT_SITE_URL: &str = "https://www.weddingcounselors.com";
pub const ROBOTS_INDEX: &str = "index, follow, max-snippet:-1, max-image-preview:large, max-video-preview:-1";
pub const ROBOTS_NOINDEX: &str = "noindex, follow";

/// Site-wide identity used by every page
#[derive(Debug, Clone)]
pub struct SiteInfo {
    pub url: String,
    pub name: String,
    pub description: String,
    pub support_email: String,
    pub same_as: Vec<String>,
    pub default_image: String,
    pub twitter_handle: Option<String>,
}

impl SiteInfo {
    /// Site identity with the canonical base URL resolved
    pub fn new(
        configured_url: Option<&str>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            url: resolve_site_url(configured_url),
            name: name.into(),
            description: description.into(),
            support_email: "support@weddingcounselors.com".to_string(),
            same_as: vec![
                "https://www.facebook.com/weddingcounselors".to_string(),
                "https://twitter.com/weddingcounsel".to_string(),
            ],
            default_image: "/assets/images/og-default.webp".to_string(),
            twitter_handle: None,
        }
    }

    /// Absolute URL for a site path; absolute inputs pass through
    pub fn absolute(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}{}", self.url, path)
    }
}

/// Canonical base URL
///
/// Tracking hosts (`://click.`) and blank values fall back to the public
/// site URL. Trailing slashes are removed.
pub fn resolve_site_url(configured: Option<&str>) -> String {
    match configured.map(str::trim).filter(|u| !u.is_empty()) {
        Some(url) if !url.to_lowercase().contains("://click.") => url.trim_end_matches('/').to_string(),
        _ => DEFAULT_SITE_URL.to_string(),
    }
}

pub fn canonical_url(site_url: &str, path: &str) -> String {
    format!("{}{}", site_url, canonical_path(path))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub name: String,
    pub url: Option<String>,
}

impl Breadcrumb {
    pub fn new(name: impl Into<String>, url: Option<&str>) -> Self {
        Self {
            name: name.into(),
            url: url.map(str::to_string),
        }
    }

    /// Home / States / {state}
    pub fn state_trail(state_name: &str, state_slug: &str) -> Vec<Breadcrumb> {
        vec![
            Breadcrumb::new("Home", Some("/")),
            Breadcrumb::new("States", Some("/states")),
            Breadcrumb::new(state_name, Some(format!("/premarital-counseling/{}", state_slug).as_str())),
        ]
    }

    /// Home / States / {state} / {city}
    pub fn city_trail(state_name: &str, state_slug: &str, city_name: &str, city_slug: &str) -> Vec<Breadcrumb> {
        let mut trail = Self::state_trail(state_name, state_slug);
        trail.push(Breadcrumb::new(
            city_name,
            Some(format!("/premarital-counseling/{}/{}", state_slug, city_slug).as_str()),
        ));
        trail
    }
}

/// Per-page SEO inputs
#[derive(Debug, Clone, Default)]
pub struct PageSeo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub path: String,
    pub page_type: Option<String>,
    pub image: Option<String>,
    pub keywords: Vec<String>,
    pub structured_data: Option<Value>,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub faqs: Vec<Faq>,
    pub reviews: Vec<Review>,
    /// Name of the reviewed professional; reviews are dropped without it
    pub reviewed_name: Option<String>,
    pub noindex: bool,
}

/// Head tags for a page
#[derive(Debug, Clone, Serialize)]
pub struct MetaTags {
    pub title: String,
    pub description: String,
    pub robots: String,
    pub canonical: String,
    pub keywords: Option<String>,
    pub og_type: String,
    pub og_url: String,
    pub og_title: String,
    pub og_description: String,
    pub og_image: String,
    pub og_site_name: String,
    pub twitter_card: String,
    pub twitter_url: String,
    pub twitter_title: String,
    pub twitter_description: String,
    pub twitter_image: String,
    pub twitter_site: Option<String>,
}

/// Everything the page renderer needs for the document head
#[derive(Debug, Clone, Serialize)]
pub struct SeoDocument {
    pub meta: MetaTags,
    pub json_ld: Value,
}

pub fn organization_entity(site: &SiteInfo) -> Value {
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "Organization",
        "name": site.name,
        "url": site.url,
        "logo": format!("{}/logo.png", site.url),
        "description": site.description,
        "sameAs": site.same_as,
        "contactPoint": {
            "@type": "ContactPoint",
            "contactType": "Customer Service",
            "email": site.support_email,
            "availableLanguage": ["English"]
        },
        "areaServed": {
            "@type": "Country",
            "name": "United States"
        },
        "knowsAbout": [
            "Premarital Counseling",
            "Marriage Preparation",
            "Pre-Marriage Therapy",
            "Relationship Counseling",
            "Engaged Couples Counseling"
        ]
    })
}

/// BreadcrumbList with 1-based positions; `item` is omitted for crumbs without a URL
pub fn breadcrumb_entity(breadcrumbs: &[Breadcrumb], site_url: &str) -> Option<Value> {
    if breadcrumbs.is_empty() {
        return None;
    }

    let items: Vec<Value> = breadcrumbs
        .iter()
        .enumerate()
        .map(|(index, crumb)| {
            let mut item = Map::new();
            item.insert("@type".into(), json!("ListItem"));
            item.insert("position".into(), json!(index + 1));
            item.insert("name".into(), json!(crumb.name));
            if let Some(url) = &crumb.url {
                item.insert("item".into(), json!(format!("{}{}", site_url, url)));
            }
            Value::Object(item)
        })
        .collect();

    Some(json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "BreadcrumbList",
        "itemListElement": items
    }))
}

pub fn faq_entity(faqs: &[Faq]) -> Option<Value> {
    if faqs.is_empty() {
        return None;
    }

    let questions: Vec<Value> = faqs
        .iter()
        .map(|faq| {
            json!({
                "@type": "Question",
                "name": faq.question,
                "acceptedAnswer": {
                    "@type": "Answer",
                    "text": faq.answer
                }
            })
        })
        .collect();

    Some(json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "FAQPage",
        "mainEntity": questions
    }))
}

/// One Review entity per review of the named professional
pub fn review_entities(reviews: &[Review], reviewed_name: Option<&str>) -> Vec<Value> {
    let Some(name) = reviewed_name else {
        return Vec::new();
    };

    reviews
        .iter()
        .map(|review| {
            json!({
                "@context": SCHEMA_CONTEXT,
                "@type": "Review",
                "reviewRating": {
                    "@type": "Rating",
                    "ratingValue": review.rating,
                    "bestRating": "5"
                },
                "author": {
                    "@type": "Person",
                    "name": review.author
                },
                "reviewBody": review.review_body,
                "itemReviewed": {
                    "@type": "Person",
                    "name": name
                }
            })
        })
        .collect()
}

/// Single entity as-is, several wrapped in an `@graph`
pub fn wrap_graph(mut entities: Vec<Value>) -> Value {
    match entities.len() {
        0 => Value::Null,
        1 => entities.remove(0),
        _ => json!({
            "@context": SCHEMA_CONTEXT,
            "@graph": entities
        }),
    }
}

/// Combine site and page inputs into head tags and one JSON-LD payload
///
/// The Organization entity is always first, followed by page data,
/// breadcrumbs, FAQs and reviews when present.
pub fn assemble(site: &SiteInfo, page: &PageSeo) -> SeoDocument {
    let mut entities = vec![organization_entity(site)];

    if let Some(data) = page.structured_data.as_ref().filter(|d| !d.is_null()) {
        entities.push(data.clone());
    }
    if let Some(crumbs) = breadcrumb_entity(&page.breadcrumbs, &site.url) {
        entities.push(crumbs);
    }
    if let Some(faqs) = faq_entity(&page.faqs) {
        entities.push(faqs);
    }
    entities.extend(review_entities(&page.reviews, page.reviewed_name.as_deref()));

    SeoDocument {
        meta: meta_tags(site, page),
        json_ld: wrap_graph(entities),
    }
}

fn meta_tags(site: &SiteInfo, page: &PageSeo) -> MetaTags {
    let title = match page.title.as_deref().filter(|t| !t.is_empty()) {
        Some(title) => format!("{} | {}", title, site.name),
        None => site.name.clone(),
    };
    let description = page
        .description
        .clone()
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| site.description.clone());
    let url = canonical_url(&site.url, &page.path);
    let image = site.absolute(page.image.as_deref().unwrap_or(&site.default_image));
    let keywords = (!page.keywords.is_empty()).then(|| page.keywords.join(", "));
    let robots = if page.noindex { ROBOTS_NOINDEX } else { ROBOTS_INDEX };

    MetaTags {
        title: title.clone(),
        description: description.clone(),
        robots: robots.to_string(),
        canonical: url.clone(),
        keywords,
        og_type: page.page_type.clone().unwrap_or_else(|| "website".to_string()),
        og_url: url.clone(),
        og_title: title.clone(),
        og_description: description.clone(),
        og_image: image.clone(),
        og_site_name: site.name.clone(),
        twitter_card: "summary_large_image".to_string(),
        twitter_url: url,
        twitter_title: title,
        twitter_description: description,
        twitter_image: image,
        twitter_site: site.twitter_handle.as_ref().map(|h| format!("@{}", h.trim_start_matches('@'))),
    }
}

/// Person/LocalBusiness entity for a profile page
pub fn professional_entity(profile: &Profile, site: &SiteInfo) -> Value {
    let city = profile.city.as_deref().unwrap_or_default();
    let region = profile.state_province.as_deref().unwrap_or_default();
    let image = match profile.photo_url.as_deref() {
        Some(photo) => site.absolute(photo),
        None => site.absolute("/media/default-therapist.webp"),
    };
    let service_type = if profile.specialties.is_empty() {
        vec!["Premarital Counseling".to_string()]
    } else {
        profile.specialties.clone()
    };
    let same_as: Vec<&str> = [
        &profile.website,
        &profile.facebook_url,
        &profile.linkedin_url,
        &profile.instagram_url,
    ]
    .into_iter()
    .filter_map(|u| u.as_deref())
    .filter(|u| !u.is_empty())
    .collect();

    let mut entity = json!({
        "@context": SCHEMA_CONTEXT,
        "@type": ["Person", "LocalBusiness"],
        "name": profile.full_name,
        "jobTitle": profile.profession_label(),
        "description": profile.bio,
        "image": image,
        "address": {
            "@type": "PostalAddress",
            "addressLocality": profile.city,
            "addressRegion": profile.state_province,
            "postalCode": profile.postal_code,
            "addressCountry": "US"
        },
        "areaServed": {
            "@type": "Place",
            "name": format!("{}, {}", city, region)
        },
        "serviceType": service_type,
        "knowsAbout": [
            "Marriage Counseling",
            "Premarital Counseling",
            "Relationship Therapy",
            "Couples Therapy"
        ],
        "mainEntityOfPage": format!("{}/profile/{}", site.url, profile.path_slug()),
        "sameAs": same_as
    });

    if profile.contact_visible() {
        entity["telephone"] = json!(profile.phone);
        entity["email"] = json!(profile.email);
        entity["url"] = json!(profile.website);
    }

    if let Some(average) = profile.average_rating() {
        entity["aggregateRating"] = json!({
            "@type": "AggregateRating",
            "ratingValue": format!("{:.1}", average),
            "reviewCount": profile.reviews.len()
        });
    }

    entity
}

/// ItemList of professionals listed on a city page
pub fn city_list_entity(city_name: &str, state_name: &str, profiles: &[Profile]) -> Value {
    let items: Vec<Value> = profiles
        .iter()
        .enumerate()
        .map(|(index, profile)| {
            json!({
                "@type": "ListItem",
                "position": index + 1,
                "item": {
                    "@type": "Person",
                    "name": profile.full_name,
                    "jobTitle": profile.profession_label(),
                    "address": {
                        "@type": "PostalAddress",
                        "addressLocality": profile.city,
                        "addressRegion": profile.state_province
                    }
                }
            })
        })
        .collect();

    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "ItemList",
        "name": format!("Premarital Counselors in {}, {}", city_name, state_name),
        "description": format!(
            "Find qualified premarital counselors and marriage therapists in {}, {}",
            city_name, state_name
        ),
        "numberOfItems": profiles.len(),
        "itemListElement": items
    })
}

/// ItemList of city pages linked from a state page
pub fn state_list_entity(state_name: &str, cities: &[CityRoute], site_url: &str) -> Value {
    let items: Vec<Value> = cities
        .iter()
        .enumerate()
        .map(|(index, city)| {
            json!({
                "@type": "ListItem",
                "position": index + 1,
                "name": format!("Premarital Counseling in {}", city.city_name),
                "item": format!("{}{}", site_url, city.path())
            })
        })
        .collect();

    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "ItemList",
        "name": format!("Premarital Counseling in {}", state_name),
        "numberOfItems": cities.len(),
        "itemListElement": items
    })
}
