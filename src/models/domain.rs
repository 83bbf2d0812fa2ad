use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit JSON `null` the same as a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Paid subscription level of a professional
///
/// Controls listing order and whether contact details are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    Community,
    LocalFeatured,
    AreaSpotlight,
    #[default]
    #[serde(other)]
    Unknown,
}

impl SubscriptionTier {
    /// Sort rank, lower sorts first
    pub fn rank(self) -> u8 {
        match self {
            SubscriptionTier::AreaSpotlight => 1,
            SubscriptionTier::LocalFeatured => 2,
            SubscriptionTier::Community => 3,
            SubscriptionTier::Unknown => 99,
        }
    }

    pub fn is_paid(self) -> bool {
        matches!(self, SubscriptionTier::AreaSpotlight | SubscriptionTier::LocalFeatured)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SubscriptionTier::Community => "community",
            SubscriptionTier::LocalFeatured => "local_featured",
            SubscriptionTier::AreaSpotlight => "area_spotlight",
            SubscriptionTier::Unknown => "unknown",
        }
    }
}

/// Professional profile as stored in the remote datastore
///
/// Every optional column has a serde default so callers never branch on
/// missing JSON keys; use the accessors for display values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub profession: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state_province: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub specialties: Vec<String>,
    #[serde(default, alias = "subscription_tier", deserialize_with = "null_as_default")]
    pub tier: SubscriptionTier,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_sponsored: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sponsored_rank: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_claimed: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_hidden: bool,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub facebook_url: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub instagram_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Profile {
    /// First word of the full name, used in message greetings
    pub fn first_name(&self) -> Option<&str> {
        self.full_name.split_whitespace().next()
    }

    /// Profession text, defaulting to the generic listing label
    pub fn profession_label(&self) -> &str {
        self.profession
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or("Marriage Counselor")
    }

    /// Whether phone/email/website are shown on the listing
    pub fn contact_visible(&self) -> bool {
        self.tier.is_paid() || self.is_sponsored
    }

    /// Listing view: phone, email and website cleared unless contact is visible
    pub fn public_view(mut self) -> Self {
        if !self.contact_visible() {
            self.email = None;
            self.phone = None;
            self.website = None;
        }
        self
    }

    /// Email address if present and non-blank
    pub fn contact_email(&self) -> Option<&str> {
        self.email.as_deref().map(str::trim).filter(|e| !e.is_empty())
    }

    /// Mean review rating, if there are reviews
    pub fn average_rating(&self) -> Option<f64> {
        if self.reviews.is_empty() {
            return None;
        }
        let total: f64 = self.reviews.iter().map(|r| r.rating).sum();
        Some(total / self.reviews.len() as f64)
    }

    /// Slug if set, otherwise the id
    pub fn path_slug(&self) -> &str {
        self.slug.as_deref().unwrap_or(&self.id)
    }
}

/// Client review shown on a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub rating: f64,
    #[serde(default)]
    pub author: String,
    #[serde(default, alias = "reviewBody")]
    pub review_body: String,
}

/// Kind of counselor a couple asked for on the inquiry form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PreferredType {
    #[default]
    Either,
    Therapist,
    Clergy,
}

impl PreferredType {
    pub fn as_str(self) -> &'static str {
        match self {
            PreferredType::Either => "either",
            PreferredType::Therapist => "therapist",
            PreferredType::Clergy => "clergy",
        }
    }
}

/// Status written with a new inquiry; later transitions belong to the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    Sent,
}

impl InquiryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            InquiryStatus::Sent => "sent",
        }
    }
}

/// Inquiry record persisted once per distributed lead
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inquiry {
    pub id: uuid::Uuid,
    pub couple_name: Option<String>,
    pub couple_email: String,
    pub message: String,
    pub preferred_type: PreferredType,
    pub city: String,
    pub state: String,
    pub provider_ids: Vec<String>,
    pub source: String,
    pub status: InquiryStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Which piece of contact info a visitor revealed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevealType {
    Phone,
    Email,
    Website,
}

impl RevealType {
    pub fn as_str(self) -> &'static str {
        match self {
            RevealType::Phone => "phone",
            RevealType::Email => "email",
            RevealType::Website => "website",
        }
    }
}

/// Analytics event for a contact reveal on a listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactReveal {
    pub profile_id: String,
    pub reveal_type: RevealType,
    pub session_id: Option<String>,
    pub user_agent: Option<String>,
    pub city: Option<String>,
    pub state_province: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Whether generated copy belongs to a city page or a state page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    #[default]
    City,
    State,
}

impl ContentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::City => "city",
            ContentKind::State => "state",
        }
    }

    /// Name of the generation function for this kind
    pub fn generator_function(self) -> &'static str {
        match self {
            ContentKind::City => "generate-city-content",
            ContentKind::State => "generate-state-content",
        }
    }
}

/// AI-generated location copy
///
/// Field names on the wire follow the content cache table columns; the
/// generation functions return the same shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationContent {
    #[serde(default, rename = "content_kind")]
    pub kind: ContentKind,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub state_abbr: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "h1_content", alias = "h1")]
    pub h1: Option<String>,
    #[serde(default, rename = "intro_paragraph", alias = "intro")]
    pub intro: Option<String>,
    #[serde(flatten)]
    pub sections: ContentSections,
    #[serde(default, rename = "api_provider", alias = "provider")]
    pub provider: Option<String>,
    #[serde(default)]
    pub generation_cost_tokens: Option<u64>,
    #[serde(default, rename = "content_generated_at", alias = "generated_at")]
    pub generated_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default, rename = "cache_expires_at", alias = "expires_at")]
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl LocationContent {
    /// Empty record for the given location, used before filling generated fields
    pub fn new(kind: ContentKind, state: impl Into<String>, city: Option<String>) -> Self {
        Self {
            kind,
            state: state.into(),
            state_abbr: None,
            city,
            title: None,
            description: None,
            h1: None,
            intro: None,
            sections: ContentSections::default(),
            provider: None,
            generation_cost_tokens: None,
            generated_at: None,
            expires_at: None,
        }
    }

    pub fn is_expired(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.expires_at.map(|at| at <= now).unwrap_or(false)
    }

    /// Placeholder copy that must keep a page out of the index
    pub fn looks_like_placeholder(&self) -> bool {
        self.description
            .as_deref()
            .map(|d| {
                let d = d.to_lowercase();
                d.contains("placeholder") || d.contains("coming soon")
            })
            .unwrap_or(false)
    }
}

/// Structured sections of generated copy
///
/// City rows use the first six; state rows add overview, city and resource
/// sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentSections {
    #[serde(default, rename = "marriage_statistics", skip_serializing_if = "Option::is_none")]
    pub marriage_stats: Option<serde_json::Value>,
    #[serde(default, rename = "local_venues", skip_serializing_if = "Option::is_none")]
    pub venues: Option<serde_json::Value>,
    #[serde(default, rename = "pricing_insights", skip_serializing_if = "Option::is_none")]
    pub pricing: Option<serde_json::Value>,
    #[serde(default, rename = "legal_requirements", skip_serializing_if = "Option::is_none")]
    pub legal: Option<serde_json::Value>,
    #[serde(default, rename = "nearby_cities", skip_serializing_if = "Option::is_none")]
    pub nearby: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demographics: Option<serde_json::Value>,
    #[serde(default, rename = "state_overview", skip_serializing_if = "Option::is_none")]
    pub overview: Option<serde_json::Value>,
    #[serde(default, rename = "popular_cities_info", skip_serializing_if = "Option::is_none")]
    pub popular_cities: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counseling_resources: Option<serde_json::Value>,
}

/// Filters for a directory listing query
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ProfileQuery {
    pub state_abbr: Option<String>,
    pub city: Option<String>,
    pub limit: Option<usize>,
}

impl ProfileQuery {
    pub fn for_state(state_abbr: impl Into<String>) -> Self {
        Self {
            state_abbr: Some(state_abbr.into()),
            ..Self::default()
        }
    }

    pub fn for_city(state_abbr: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            state_abbr: Some(state_abbr.into()),
            city: Some(city.into()),
            ..Self::default()
        }
    }
}
