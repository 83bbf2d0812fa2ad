// Criterion benchmarks for the counselor directory

use counselor_directory::core::distributor::select_recipients;
use counselor_directory::core::{assemble, classify_segments, Breadcrumb, PageSeo, SiteInfo};
use counselor_directory::models::{PreferredType, Profile, SubscriptionTier};
use counselor_directory::registry::Registries;
use counselor_directory::LeadPolicy;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const PROFESSIONS: [&str; 6] = ["LMFT", "Pastor", "LPC", "Life Coach", "Priest", "LCSW"];

fn create_profile(id: usize) -> Profile {
    let mut profile: Profile = serde_json::from_value(serde_json::json!({
        "id": id.to_string(),
        "full_name": format!("Counselor {}", id),
        "city": "Austin",
        "state_province": "TX",
    }))
    .unwrap();
    profile.profession = Some(PROFESSIONS[id % PROFESSIONS.len()].to_string());
    profile.tier = match id % 7 {
        0 => SubscriptionTier::AreaSpotlight,
        1 | 2 => SubscriptionTier::LocalFeatured,
        _ => SubscriptionTier::Community,
    };
    profile
}

fn bench_classification(c: &mut Criterion) {
    let registries = Registries::builtin();
    let paths: Vec<Vec<String>> = [
        "christian",
        "texas",
        "texas/san-antonio",
        "new-york/New-York",
        "ohio/jane-doe-lmft",
        "gottman/california/los-angeles",
        "texas/austin/jane-doe",
    ]
    .iter()
    .map(|p| p.split('/').map(str::to_string).collect())
    .collect();

    c.bench_function("classify_segments", |b| {
        b.iter(|| {
            for segments in &paths {
                black_box(classify_segments(black_box(segments), &registries));
            }
        });
    });
}

fn bench_selection(c: &mut Criterion) {
    let policy = LeadPolicy::default();
    let mut group = c.benchmark_group("select_recipients");

    for pool_size in [10, 50, 200, 1000].iter() {
        let pool: Vec<Profile> = (0..*pool_size).map(create_profile).collect();

        group.bench_with_input(BenchmarkId::new("therapist", pool_size), pool_size, |b, _| {
            b.iter(|| select_recipients(black_box(pool.clone()), PreferredType::Therapist, &policy));
        });
    }

    group.finish();
}

fn bench_seo_assembly(c: &mut Criterion) {
    let site = SiteInfo::new(None, "Wedding Counselors", "Find premarital counselors near you.");
    let registries = Registries::builtin();
    let specialty = registries.specialties.by_slug("christian").cloned();
    let faqs = specialty.map(|s| s.faqs).unwrap_or_default();

    let page = PageSeo {
        title: Some("Christian Premarital Counseling in Texas".to_string()),
        description: Some("Find Christian premarital counselors in Texas.".to_string()),
        path: "/premarital-counseling/christian/texas/".to_string(),
        breadcrumbs: Breadcrumb::state_trail("Texas", "texas"),
        faqs,
        ..PageSeo::default()
    };

    c.bench_function("assemble_seo_document", |b| {
        b.iter(|| assemble(black_box(&site), black_box(&page)));
    });
}

criterion_group!(benches, bench_classification, bench_selection, bench_seo_assembly);
criterion_main!(benches);
