// Unit tests for the counselor directory core

use counselor_directory::core::distributor::{select_recipients, selection_size};
use counselor_directory::core::indexing::{city_indexable, state_indexable};
use counselor_directory::core::sitemap::{anchor_city_entries, city_priority, render_urlset, SitemapEntry};
use counselor_directory::core::{
    assemble, canonical_path, classify_segments, legacy_redirect, matches_preferred_type, slugify,
    sort_for_directory, title_case, Breadcrumb, Classification, PageSeo, Route, SiteInfo,
};
use counselor_directory::models::{PreferredType, Profile, SubscriptionTier};
use counselor_directory::registry::Registries;
use counselor_directory::LeadPolicy;
use std::collections::HashMap;

fn create_test_profile(id: &str, profession: Option<&str>, tier: SubscriptionTier) -> Profile {
    let mut profile: Profile =
        serde_json::from_value(serde_json::json!({ "id": id, "full_name": format!("Test {}", id) })).unwrap();
    profile.profession = profession.map(str::to_string);
    profile.tier = tier;
    profile
}

fn segs(path: &str) -> Vec<String> {
    path.split('/').filter(|s| !s.is_empty()).map(str::to_string).collect()
}

fn site() -> SiteInfo {
    SiteInfo::new(None, "Wedding Counselors", "Find premarital counselors near you.")
}

#[test]
fn test_slug_round_trip_for_multi_word_cities() {
    assert_eq!(slugify("San Antonio"), "san-antonio");
    assert_eq!(slugify("  Coeur d'Alene "), "coeur-dalene");
    assert_eq!(title_case("salt-lake-city"), "Salt Lake City");
    assert_eq!(title_case("new--york"), "New York");
}

#[test]
fn test_canonical_path_rules() {
    assert_eq!(canonical_path(""), "/");
    assert_eq!(canonical_path("///"), "/");
    assert_eq!(canonical_path("/premarital-counseling/texas/"), "/premarital-counseling/texas");
    assert_eq!(canonical_path("/blog?page=2#top"), "/blog");
}

#[test]
fn test_specialty_wins_over_state() {
    let registries = Registries::builtin();

    assert_eq!(
        classify_segments(&segs("christian/texas"), &registries),
        Classification::Resolved(Route::SpecialtyState {
            specialty: "christian".to_string(),
            state: "texas".to_string(),
        })
    );
    // specialty slugs are exact
    assert_eq!(
        classify_segments(&segs("Christian"), &registries),
        Classification::Resolved(Route::NotFound)
    );
}

#[test]
fn test_unknown_second_segment_needs_lookup() {
    let registries = Registries::builtin();

    assert_eq!(
        classify_segments(&segs("ohio/jane-doe-lmft"), &registries),
        Classification::NeedsProfileLookup {
            state: "ohio".to_string(),
            segment: "jane-doe-lmft".to_string(),
        }
    );
    assert_eq!(
        classify_segments(&segs("ohio/Cleveland"), &registries),
        Classification::Resolved(Route::City {
            state: "ohio".to_string(),
            city: "cleveland".to_string(),
            fallback: None,
        })
    );
}

#[test]
fn test_segment_count_bounds() {
    let registries = Registries::builtin();

    for path in ["", "texas/austin/jane/extra", "christian/texas/austin/jane"] {
        assert_eq!(
            classify_segments(&segs(path), &registries),
            Classification::Resolved(Route::NotFound),
            "{}",
            path
        );
    }
}

#[test]
fn test_legacy_redirects() {
    assert_eq!(legacy_redirect("/professionals/ohio/").as_deref(), Some("/states/ohio"));
    assert_eq!(legacy_redirect("/professionals?x=1").as_deref(), Some("/states"));
    assert_eq!(legacy_redirect("/professionalsx"), None);
    assert_eq!(legacy_redirect("/states/ohio"), None);
}

#[test]
fn test_preferred_type_matching() {
    let lmft = create_test_profile("1", Some("Licensed LMFT"), SubscriptionTier::Community);
    let pastor = create_test_profile("2", Some("Youth PASTOR"), SubscriptionTier::Community);
    let coach = create_test_profile("3", Some("Relationship Coach"), SubscriptionTier::Community);
    let blank = create_test_profile("4", None, SubscriptionTier::Community);

    assert!(matches_preferred_type(&lmft, PreferredType::Therapist));
    assert!(!matches_preferred_type(&lmft, PreferredType::Clergy));
    assert!(matches_preferred_type(&pastor, PreferredType::Clergy));
    assert!(!matches_preferred_type(&coach, PreferredType::Therapist));
    assert!(!matches_preferred_type(&blank, PreferredType::Therapist));
    assert!(matches_preferred_type(&blank, PreferredType::Either));
}

#[test]
fn test_selection_never_exceeds_pool_or_max() {
    for available in 0..12 {
        let take = selection_size(available, 3, 5);
        assert!(take <= available);
        assert!(take <= 5);
        if available >= 3 {
            assert!(take >= 3);
        }
    }
}

#[test]
fn test_paid_tiers_are_selected_first() {
    let pool = vec![
        create_test_profile("c1", Some("Pastor"), SubscriptionTier::Community),
        create_test_profile("c2", Some("Priest"), SubscriptionTier::Community),
        create_test_profile("c3", Some("Minister"), SubscriptionTier::Community),
        create_test_profile("c4", Some("Clergy"), SubscriptionTier::Community),
        create_test_profile("c5", Some("Pastor"), SubscriptionTier::Community),
        create_test_profile("a1", Some("Pastor"), SubscriptionTier::AreaSpotlight),
        create_test_profile("l1", Some("Priest"), SubscriptionTier::LocalFeatured),
    ];

    let selected = select_recipients(pool, PreferredType::Clergy, &LeadPolicy::default());
    let ids: Vec<&str> = selected.iter().map(|p| p.id.as_str()).collect();

    assert_eq!(ids, vec!["a1", "l1", "c1", "c2", "c3"]);
}

#[test]
fn test_either_takes_area_then_local_from_mixed_pool() {
    let tiers = [
        SubscriptionTier::Community,
        SubscriptionTier::AreaSpotlight,
        SubscriptionTier::Community,
        SubscriptionTier::LocalFeatured,
        SubscriptionTier::Community,
        SubscriptionTier::LocalFeatured,
        SubscriptionTier::AreaSpotlight,
        SubscriptionTier::Community,
        SubscriptionTier::LocalFeatured,
        SubscriptionTier::Community,
    ];
    let pool: Vec<Profile> = tiers
        .iter()
        .enumerate()
        .map(|(i, tier)| create_test_profile(&format!("p{}", i), Some("LMFT"), *tier))
        .collect();

    let selected = select_recipients(pool, PreferredType::Either, &LeadPolicy::default());
    let selected_tiers: Vec<SubscriptionTier> = selected.iter().map(|p| p.tier).collect();

    assert_eq!(
        selected_tiers,
        vec![
            SubscriptionTier::AreaSpotlight,
            SubscriptionTier::AreaSpotlight,
            SubscriptionTier::LocalFeatured,
            SubscriptionTier::LocalFeatured,
            SubscriptionTier::LocalFeatured,
        ]
    );
    let ids: Vec<&str> = selected.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p6", "p3", "p5", "p8"]);
}

#[test]
fn test_small_match_sends_to_everyone_matching() {
    let pool = vec![
        create_test_profile("t1", Some("LMFT"), SubscriptionTier::AreaSpotlight),
        create_test_profile("c1", Some("Pastor"), SubscriptionTier::Community),
        create_test_profile("t2", Some("LPC"), SubscriptionTier::LocalFeatured),
        create_test_profile("c2", Some("Minister"), SubscriptionTier::LocalFeatured),
        create_test_profile("x1", Some("Life Coach"), SubscriptionTier::AreaSpotlight),
    ];

    let selected = select_recipients(pool, PreferredType::Clergy, &LeadPolicy::default());
    let ids: Vec<&str> = selected.iter().map(|p| p.id.as_str()).collect();

    assert_eq!(ids, vec!["c2", "c1"]);
}

#[test]
fn test_hidden_profiles_never_selected() {
    let mut hidden = create_test_profile("h1", Some("LMFT"), SubscriptionTier::AreaSpotlight);
    hidden.is_hidden = true;
    let pool = vec![hidden, create_test_profile("c1", Some("LMFT"), SubscriptionTier::Community)];

    let selected = select_recipients(pool, PreferredType::Therapist, &LeadPolicy::default());

    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].id, "c1");
}

#[test]
fn test_directory_order_prefers_sponsorship_within_tier() {
    let mut plain = create_test_profile("plain", None, SubscriptionTier::Community);
    plain.created_at = Some(chrono::Utc::now());
    let mut sponsored = create_test_profile("sponsored", None, SubscriptionTier::Community);
    sponsored.is_sponsored = true;
    let featured = create_test_profile("featured", None, SubscriptionTier::LocalFeatured);

    let mut profiles = vec![plain, sponsored, featured];
    sort_for_directory(&mut profiles);

    let ids: Vec<&str> = profiles.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["featured", "sponsored", "plain"]);
}

#[test]
fn test_indexing_thresholds() {
    let registries = Registries::builtin();
    let locations = &registries.locations;

    assert!(city_indexable(locations, "colorado", "denver", 0));
    assert!(!city_indexable(locations, "ohio", "toledo", 2));
    assert!(city_indexable(locations, "ohio", "toledo", 3));

    let wyoming = locations.state("wyoming").unwrap();
    assert!(!state_indexable(wyoming, None));
}

#[test]
fn test_seo_document_for_state_page() {
    let doc = assemble(&site(), &PageSeo {
        title: Some("Premarital Counseling in Ohio".into()),
        path: "/premarital-counseling/ohio/".into(),
        breadcrumbs: Breadcrumb::state_trail("Ohio", "ohio"),
        ..PageSeo::default()
    });

    assert_eq!(doc.meta.title, "Premarital Counseling in Ohio | Wedding Counselors");
    assert_eq!(doc.meta.canonical, "https://www.weddingcounselors.com/premarital-counseling/ohio");
    assert_eq!(doc.meta.og_url, doc.meta.canonical);
    assert_eq!(doc.meta.og_image, "https://www.weddingcounselors.com/assets/images/og-default.webp");

    let graph = doc.json_ld["@graph"].as_array().unwrap();
    assert_eq!(graph.len(), 2);
    let crumbs = graph[1]["itemListElement"].as_array().unwrap();
    assert_eq!(crumbs.len(), 3);
    assert_eq!(crumbs[2]["item"], "https://www.weddingcounselors.com/premarital-counseling/ohio");
}

#[test]
fn test_null_structured_data_is_skipped() {
    let doc = assemble(&site(), &PageSeo {
        path: "/".into(),
        structured_data: Some(serde_json::Value::Null),
        ..PageSeo::default()
    });

    assert_eq!(doc.json_ld["@type"], "Organization");
}

#[test]
fn test_city_priority_scale() {
    assert_eq!(city_priority(0, 0), 0.8);
    assert!((city_priority(10, 10) - 0.95).abs() < 1e-9);
    assert!(city_priority(20, 10) <= 0.95);
    assert!((city_priority(0, 10) - 0.7).abs() < 1e-9);
    assert!(city_priority(5, 10) > 0.8 && city_priority(5, 10) < 0.85);
}

#[test]
fn test_anchor_entries_without_counts_use_default_priority() {
    let registries = Registries::builtin();
    let entries = anchor_city_entries(&registries.locations, None);

    let cities: Vec<&SitemapEntry> = entries.iter().filter(|e| e.path.matches('/').count() == 3).collect();
    assert_eq!(cities.len(), 10);
    assert!(cities.iter().all(|e| e.priority == 0.8));
}

#[test]
fn test_anchor_entries_busiest_first() {
    let registries = Registries::builtin();
    let mut counts = HashMap::new();
    counts.insert(("illinois".to_string(), "chicago".to_string()), 40);
    counts.insert(("texas".to_string(), "austin".to_string()), 10);

    let entries = anchor_city_entries(&registries.locations, Some(&counts));
    let cities: Vec<&SitemapEntry> = entries.iter().filter(|e| e.path.matches('/').count() == 3).collect();

    assert_eq!(cities[0].path, "/premarital-counseling/illinois/chicago");
    assert_eq!(cities[1].path, "/premarital-counseling/texas/austin");

    let xml = render_urlset("https://x.test", &entries, chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    assert!(xml.contains("<lastmod>2025-03-01</lastmod>"));
}

#[test]
fn test_listing_cache_round_trip() {
    use counselor_directory::models::ProfileQuery;
    use counselor_directory::services::{CacheKey, CacheManager};

    tokio_test::block_on(async {
        let cache = CacheManager::in_memory(10, 60);
        let key = CacheKey::listing(&ProfileQuery::for_city("TX", "Austin"));
        let profiles = vec![create_test_profile("1", Some("LMFT"), SubscriptionTier::Community)];

        assert!(cache.get::<Vec<Profile>>(&key).await.is_err());
        cache.set(&key, &profiles).await.unwrap();

        let cached: Vec<Profile> = cache.get(&key).await.unwrap();
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].id, "1");
    });
}
