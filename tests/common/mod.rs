// Shared fakes and builders for the integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use counselor_directory::core::{LeadDistributor, LeadPolicy, RouteResolver, SiteInfo};
use counselor_directory::models::{
    ContactReveal, ContentKind, Inquiry, LocationContent, Profile, ProfileQuery, SubscriptionTier,
};
use counselor_directory::registry::Registries;
use counselor_directory::routes::AppState;
use counselor_directory::services::{
    CacheManager, ContentError, ContentGenerator, ContentPolicy, ContentService, ContentStore, DatastoreError,
    DirectoryService, InquiryStore, Notifier, NotifyError, OutboundMessage, ProfileSource, RevealStats, StoreError,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn create_test_profile(id: &str, profession: &str, tier: SubscriptionTier) -> Profile {
    create_located_profile(id, profession, tier, "Austin", "TX")
}

pub fn create_located_profile(
    id: &str,
    profession: &str,
    tier: SubscriptionTier,
    city: &str,
    state_abbr: &str,
) -> Profile {
    let mut profile: Profile = serde_json::from_value(serde_json::json!({
        "id": id,
        "full_name": format!("Counselor {}", id),
        "slug": format!("counselor-{}", id),
        "email": format!("{}@example.com", id),
        "phone": "555-0100",
    }))
    .unwrap();
    profile.profession = Some(profession.to_string());
    profile.tier = tier;
    profile.city = Some(city.to_string());
    profile.state_province = Some(state_abbr.to_string());
    profile
}

/// How the fake answers slug lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupBehavior {
    Normal,
    Fail,
    Hang,
}

/// In-memory profile datastore
pub struct FakeProfiles {
    pub profiles: Vec<Profile>,
    pub lookup: LookupBehavior,
    pub fail_listings: bool,
    pub lookups: AtomicUsize,
    pub listings: AtomicUsize,
}

impl FakeProfiles {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self {
            profiles,
            lookup: LookupBehavior::Normal,
            fail_listings: false,
            lookups: AtomicUsize::new(0),
            listings: AtomicUsize::new(0),
        }
    }

    pub fn with_lookup(mut self, lookup: LookupBehavior) -> Self {
        self.lookup = lookup;
        self
    }

    pub fn failing_listings(mut self) -> Self {
        self.fail_listings = true;
        self
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileSource for FakeProfiles {
    async fn list_profiles(&self, query: &ProfileQuery) -> Result<Vec<Profile>, DatastoreError> {
        self.listings.fetch_add(1, Ordering::SeqCst);
        if self.fail_listings {
            return Err(DatastoreError::ApiError("503 Service Unavailable".into()));
        }

        Ok(self
            .profiles
            .iter()
            .filter(|p| match &query.state_abbr {
                Some(abbr) => p.state_province.as_deref() == Some(abbr.as_str()),
                None => true,
            })
            .filter(|p| match &query.city {
                Some(city) => p
                    .city
                    .as_deref()
                    .map(|c| c.to_lowercase().contains(&city.to_lowercase()))
                    .unwrap_or(false),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Profile>, DatastoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        match self.lookup {
            LookupBehavior::Normal => Ok(self.profiles.iter().find(|p| p.path_slug() == slug).cloned()),
            LookupBehavior::Fail => Err(DatastoreError::ApiError("connection reset".into())),
            LookupBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(None)
            }
        }
    }

    async fn health_check(&self) -> Result<bool, DatastoreError> {
        if self.fail_listings {
            return Err(DatastoreError::ApiError("503 Service Unavailable".into()));
        }
        Ok(true)
    }
}

/// Records inquiries and reveals in memory
#[derive(Default)]
pub struct MemoryInquiryStore {
    pub inquiries: Mutex<Vec<Inquiry>>,
    pub reveals: Mutex<Vec<ContactReveal>>,
    pub fail: bool,
}

impl MemoryInquiryStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn inquiry_count(&self) -> usize {
        self.inquiries.lock().unwrap().len()
    }
}

#[async_trait]
impl InquiryStore for MemoryInquiryStore {
    async fn insert_inquiry(&self, inquiry: &Inquiry) -> Result<(), StoreError> {
        if self.fail {
            return Err(StoreError::InvalidInput("database unavailable".into()));
        }
        self.inquiries.lock().unwrap().push(inquiry.clone());
        Ok(())
    }

    async fn record_contact_reveal(&self, reveal: &ContactReveal) -> Result<(), StoreError> {
        if self.fail {
            return Err(StoreError::InvalidInput("database unavailable".into()));
        }
        self.reveals.lock().unwrap().push(reveal.clone());
        Ok(())
    }

    async fn reveal_stats(&self, profile_id: &str) -> Result<RevealStats, StoreError> {
        let reveals = self.reveals.lock().unwrap();
        let mine: Vec<_> = reveals.iter().filter(|r| r.profile_id == profile_id).collect();
        let count = |kind: &str| mine.iter().filter(|r| r.reveal_type.as_str() == kind).count() as i64;

        Ok(RevealStats {
            profile_id: profile_id.to_string(),
            total: mine.len() as i64,
            phone: count("phone"),
            email: count("email"),
            website: count("website"),
            last_revealed_at: mine.iter().map(|r| r.created_at).max(),
        })
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(!self.fail)
    }
}

/// Captures outbound messages; addresses in `fail_for` are rejected
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<OutboundMessage>>,
    pub fail_for: Vec<String>,
}

impl RecordingNotifier {
    pub fn failing_for(addresses: &[&str]) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_for: addresses.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn messages(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn with_template(&self, template: &str) -> Vec<OutboundMessage> {
        self.messages()
            .into_iter()
            .filter(|m| m.template == template)
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, message: &OutboundMessage) -> Result<(), NotifyError> {
        if self.fail_for.contains(&message.to) {
            return Err(NotifyError::Rejected("550 mailbox unavailable".into()));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Content table that never has rows
pub struct EmptyContentStore;

#[async_trait]
impl ContentStore for EmptyContentStore {
    async fn get_content(
        &self,
        _kind: ContentKind,
        _state: &str,
        _city: Option<&str>,
    ) -> Result<Option<LocationContent>, DatastoreError> {
        Ok(None)
    }

    async fn upsert_content(&self, _content: &LocationContent) -> Result<(), DatastoreError> {
        Ok(())
    }
}

/// Generator that always fails
pub struct FailingGenerator;

#[async_trait]
impl ContentGenerator for FailingGenerator {
    async fn generate(
        &self,
        _kind: ContentKind,
        _payload: &serde_json::Value,
    ) -> Result<LocationContent, ContentError> {
        Err(ContentError::Generation("model unavailable".into()))
    }
}

pub fn test_site() -> SiteInfo {
    SiteInfo::new(
        Some("https://www.weddingcounselors.com"),
        "Wedding Counselors",
        "Find premarital counselors near you.",
    )
}

/// Everything a test needs to poke at after building the app state
pub struct TestHarness {
    pub state: AppState,
    pub profiles: Arc<FakeProfiles>,
    pub store: Arc<MemoryInquiryStore>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn build_harness(profiles: FakeProfiles, store: MemoryInquiryStore, notifier: RecordingNotifier) -> TestHarness {
    let registries = Arc::new(Registries::builtin());
    let cache = Arc::new(CacheManager::in_memory(100, 60));
    let profiles = Arc::new(profiles);
    let store = Arc::new(store);
    let notifier = Arc::new(notifier);

    let directory = Arc::new(DirectoryService::new(profiles.clone(), cache.clone()));
    let resolver = Arc::new(RouteResolver::new(
        registries.clone(),
        directory.clone(),
        Duration::from_millis(100),
    ));
    let content = Arc::new(ContentService::new(
        Arc::new(EmptyContentStore),
        Arc::new(FailingGenerator),
        cache.clone(),
        ContentPolicy {
            enabled: true,
            cache_days: 30,
            cost_limit_usd: 0.50,
            cost_per_token: 0.0,
        },
    ));
    let distributor = Arc::new(LeadDistributor::new(
        store.clone(),
        notifier.clone(),
        LeadPolicy::default(),
    ));

    let state = AppState {
        registries,
        site: Arc::new(test_site()),
        resolver,
        directory,
        content,
        distributor,
        inquiries: store.clone(),
        cache,
    };

    TestHarness {
        state,
        profiles,
        store,
        notifier,
    }
}
