use crate::core::filters::{filter_by_specialty, is_listable};
use crate::core::ranking::sort_for_directory;
use crate::models::{Profile, ProfileQuery};
use crate::registry::Specialty;
use crate::services::cache::{CacheKey, CacheManager};
use crate::services::datastore::DatastoreError;
use crate::services::traits::ProfileSource;
use async_trait::async_trait;
use std::sync::Arc;

/// Query layer over the profile datastore
///
/// Adds caching, hides hidden profiles and applies directory order
/// (tier, sponsorship, recency) regardless of what the backend returns.
pub struct DirectoryService {
    source: Arc<dyn ProfileSource>,
    cache: Arc<CacheManager>,
}

impl DirectoryService {
    pub fn new(source: Arc<dyn ProfileSource>, cache: Arc<CacheManager>) -> Self {
        Self { source, cache }
    }

    /// Listed profiles in a state, optionally narrowed to a city
    pub async fn profiles_in(
        &self,
        state_abbr: &str,
        city: Option<&str>,
    ) -> Result<Vec<Profile>, DatastoreError> {
        let query = match city {
            Some(city) => ProfileQuery::for_city(state_abbr, city),
            None => ProfileQuery::for_state(state_abbr),
        };
        self.list_profiles(&query).await
    }

    /// Listed profiles qualifying for a specialty within a state or city
    pub async fn profiles_for_specialty(
        &self,
        specialty: &Specialty,
        state_abbr: &str,
        city: Option<&str>,
    ) -> Result<Vec<Profile>, DatastoreError> {
        let pool = self.profiles_in(state_abbr, city).await?;
        Ok(filter_by_specialty(pool, specialty))
    }

    /// Nationwide profiles for a specialty, from the first `limit` listings
    pub async fn specialty_nationwide(
        &self,
        specialty: &Specialty,
        limit: usize,
    ) -> Result<Vec<Profile>, DatastoreError> {
        let query = ProfileQuery {
            limit: Some(limit),
            ..ProfileQuery::default()
        };
        let pool = self.list_profiles(&query).await?;
        Ok(filter_by_specialty(pool, specialty))
    }

    pub async fn count_in(&self, state_abbr: &str, city: Option<&str>) -> Result<usize, DatastoreError> {
        self.profiles_in(state_abbr, city).await.map(|p| p.len())
    }
}

#[async_trait]
impl ProfileSource for DirectoryService {
    async fn list_profiles(&self, query: &ProfileQuery) -> Result<Vec<Profile>, DatastoreError> {
        let key = CacheKey::listing(query);
        if let Ok(cached) = self.cache.get::<Vec<Profile>>(&key).await {
            return Ok(cached);
        }

        let mut profiles: Vec<Profile> = self
            .source
            .list_profiles(query)
            .await?
            .into_iter()
            .filter(is_listable)
            .collect();
        sort_for_directory(&mut profiles);

        tracing::debug!("Directory query {} returned {} profiles", key, profiles.len());

        if let Err(e) = self.cache.set(&key, &profiles).await {
            tracing::warn!("Failed to cache listing {}: {}", key, e);
        }

        Ok(profiles)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Profile>, DatastoreError> {
        let key = CacheKey::profile(slug);
        if let Ok(cached) = self.cache.get::<Profile>(&key).await {
            return Ok(Some(cached));
        }

        let found = self.source.find_by_slug(slug).await?.filter(is_listable);

        if let Some(profile) = &found {
            if let Err(e) = self.cache.set(&key, profile).await {
                tracing::warn!("Failed to cache profile {}: {}", slug, e);
            }
        }

        Ok(found)
    }

    /// Always asks the source; a cached listing says nothing about reachability
    async fn health_check(&self) -> Result<bool, DatastoreError> {
        self.source.health_check().await
    }
}
