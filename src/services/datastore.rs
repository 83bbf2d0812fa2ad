use crate::models::{ContentKind, LocationContent, Profile, ProfileQuery};
use crate::services::traits::{ContentStore, ProfileSource};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the datastore REST API
#[derive(Debug, Error)]
pub enum DatastoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: invalid service key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Table names in the datastore
#[derive(Debug, Clone)]
pub struct DatastoreTables {
    pub profiles: String,
    pub location_content: String,
}

/// PostgREST-style datastore client
///
/// Serves profile listings, slug lookups and the generated-content cache
/// table. Every request carries the service key as both `apikey` and bearer
/// token.
pub struct DatastoreClient {
    rest_url: String,
    api_key: String,
    client: Client,
    tables: DatastoreTables,
}

impl DatastoreClient {
    pub fn new(
        rest_url: String,
        api_key: String,
        tables: DatastoreTables,
        timeout: Duration,
    ) -> Result<Self, DatastoreError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            rest_url,
            api_key,
            client,
            tables,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.rest_url.trim_end_matches('/'), table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    async fn fetch_rows(&self, url: &str) -> Result<Vec<Value>, DatastoreError> {
        tracing::debug!("Datastore query: {}", url);

        let response = self.authorized(self.client.get(url)).send().await?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(DatastoreError::Unauthorized)
            }
            status if !status.is_success() => {
                return Err(DatastoreError::ApiError(format!("Query failed: {}", status)))
            }
            _ => {}
        }

        let json: Value = response.json().await?;
        match json {
            Value::Array(rows) => Ok(rows),
            _ => Err(DatastoreError::InvalidResponse("Expected an array of rows".into())),
        }
    }

    fn parse_profiles(rows: Vec<Value>) -> Result<Vec<Profile>, DatastoreError> {
        rows.into_iter()
            .map(|row| {
                serde_json::from_value(row).map_err(|e| {
                    DatastoreError::InvalidResponse(format!("Failed to parse profile: {}", e))
                })
            })
            .collect()
    }

    /// Build the filter string for a listing query
    fn profile_filters(query: &ProfileQuery) -> Vec<String> {
        let mut filters = vec!["select=*".to_string(), "is_hidden=eq.false".to_string()];

        if let Some(abbr) = &query.state_abbr {
            filters.push(format!("state_province=eq.{}", urlencoding::encode(abbr)));
        }
        if let Some(city) = &query.city {
            filters.push(format!("city=ilike.*{}*", urlencoding::encode(city)));
        }

        filters.push("order=sponsored_rank.desc,is_sponsored.desc,created_at.desc".to_string());

        if let Some(limit) = query.limit {
            filters.push(format!("limit={}", limit));
        }

        filters
    }
}

#[async_trait]
impl ProfileSource for DatastoreClient {
    async fn list_profiles(&self, query: &ProfileQuery) -> Result<Vec<Profile>, DatastoreError> {
        let url = format!(
            "{}?{}",
            self.table_url(&self.tables.profiles),
            Self::profile_filters(query).join("&")
        );

        let rows = self.fetch_rows(&url).await?;
        Self::parse_profiles(rows)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Profile>, DatastoreError> {
        let base = self.table_url(&self.tables.profiles);
        let encoded = urlencoding::encode(slug);

        let url = format!("{}?select=*&slug=eq.{}&is_hidden=eq.false&limit=1", base, encoded);
        if let Some(profile) = Self::parse_profiles(self.fetch_rows(&url).await?)?.into_iter().next() {
            return Ok(Some(profile));
        }

        // Ids are UUIDs; anything else cannot match and would be rejected by the API
        if uuid::Uuid::parse_str(slug).is_err() {
            return Ok(None);
        }

        let url = format!("{}?select=*&id=eq.{}&is_hidden=eq.false&limit=1", base, encoded);
        Ok(Self::parse_profiles(self.fetch_rows(&url).await?)?.into_iter().next())
    }

    async fn health_check(&self) -> Result<bool, DatastoreError> {
        let url = format!("{}?select=id&limit=1", self.table_url(&self.tables.profiles));
        self.fetch_rows(&url).await.map(|_| true)
    }
}

#[async_trait]
impl ContentStore for DatastoreClient {
    async fn get_content(
        &self,
        kind: ContentKind,
        state: &str,
        city: Option<&str>,
    ) -> Result<Option<LocationContent>, DatastoreError> {
        let city_filter = match city {
            Some(city) => format!("city=eq.{}", urlencoding::encode(&city.to_lowercase())),
            None => "city=is.null".to_string(),
        };

        let url = format!(
            "{}?select=*&content_kind=eq.{}&state=eq.{}&{}&is_active=eq.true&limit=1",
            self.table_url(&self.tables.location_content),
            kind.as_str(),
            urlencoding::encode(&state.to_lowercase()),
            city_filter
        );

        let Some(row) = self.fetch_rows(&url).await?.into_iter().next() else {
            return Ok(None);
        };

        serde_json::from_value(row)
            .map(Some)
            .map_err(|e| DatastoreError::InvalidResponse(format!("Failed to parse content: {}", e)))
    }

    async fn upsert_content(&self, content: &LocationContent) -> Result<(), DatastoreError> {
        let url = format!(
            "{}?on_conflict=content_kind,state,city",
            self.table_url(&self.tables.location_content)
        );

        let mut body = serde_json::to_value(content)
            .map_err(|e| DatastoreError::InvalidResponse(e.to_string()))?;
        if let Value::Object(map) = &mut body {
            map.insert("is_active".to_string(), Value::Bool(true));
        }

        let response = self
            .authorized(self.client.post(&url))
            .header("Prefer", "resolution=merge-duplicates")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DatastoreError::ApiError(format!(
                "Failed to upsert content: {}",
                response.status()
            )));
        }

        Ok(())
    }
}
