//! Async seams between the core logic and the outside world
//!
//! Production implementations live next to this module; tests swap in
//! in-memory fakes.

use async_trait::async_trait;

use crate::models::{ContactReveal, ContentKind, Inquiry, LocationContent, Profile, ProfileQuery};
use crate::services::content::ContentError;
use crate::services::datastore::DatastoreError;
use crate::services::notifier::{NotifyError, OutboundMessage};
use crate::services::postgres::{RevealStats, StoreError};

/// Read access to professional profiles
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Visible profiles matching the query, in datastore order
    async fn list_profiles(&self, query: &ProfileQuery) -> Result<Vec<Profile>, DatastoreError>;

    /// Profile by slug, falling back to id. `Ok(None)` when neither matches.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Profile>, DatastoreError>;

    async fn health_check(&self) -> Result<bool, DatastoreError> {
        Ok(true)
    }
}

/// Write access for lead and analytics records
#[async_trait]
pub trait InquiryStore: Send + Sync {
    async fn insert_inquiry(&self, inquiry: &Inquiry) -> Result<(), StoreError>;

    async fn record_contact_reveal(&self, reveal: &ContactReveal) -> Result<(), StoreError>;

    async fn reveal_stats(&self, profile_id: &str) -> Result<RevealStats, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

/// Outbound templated messages
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &OutboundMessage) -> Result<(), NotifyError>;
}

/// Cached generated location copy
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn get_content(
        &self,
        kind: ContentKind,
        state: &str,
        city: Option<&str>,
    ) -> Result<Option<LocationContent>, DatastoreError>;

    async fn upsert_content(&self, content: &LocationContent) -> Result<(), DatastoreError>;
}

/// Produces fresh location copy
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// `payload` is the request body for the generation function
    async fn generate(
        &self,
        kind: ContentKind,
        payload: &serde_json::Value,
    ) -> Result<LocationContent, ContentError>;
}
