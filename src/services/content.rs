use crate::models::{ContentKind, LocationContent};
use crate::registry::StateInfo;
use crate::services::cache::{CacheKey, CacheManager};
use crate::services::datastore::DatastoreError;
use crate::services::traits::{ContentGenerator, ContentStore};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors from the content cache-or-generate path
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Content generation is disabled")]
    Disabled,

    #[error("Estimated cost ${estimated:.4} exceeds limit ${limit}")]
    CostLimitExceeded { estimated: f64, limit: f64 },

    #[error("Datastore error: {0}")]
    Datastore(#[from] DatastoreError),

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Generation failed: {0}")]
    Generation(String),
}

/// Tokens assumed for a prompt: a quarter per character plus output budget
pub const OUTPUT_TOKEN_BUDGET: u64 = 2000;

#[inline]
pub fn estimate_tokens(prompt: &str) -> u64 {
    (prompt.len() as u64).div_ceil(4) + OUTPUT_TOKEN_BUDGET
}

#[inline]
pub fn estimate_cost(prompt: &str, cost_per_token: f64) -> f64 {
    estimate_tokens(prompt) as f64 * cost_per_token
}

/// Request body sent to the generation function
pub fn generation_payload(kind: ContentKind, state: &StateInfo, city: Option<&str>) -> Value {
    match (kind, city) {
        (ContentKind::City, Some(city)) => json!({
            "city": city,
            "state": state.slug,
            "stateAbbr": state.abbr,
        }),
        _ => json!({
            "state": state.slug,
            "stateName": state.name,
            "stateAbbr": state.abbr,
            "majorCities": state.major_cities,
        }),
    }
}

/// Content service limits
#[derive(Debug, Clone)]
pub struct ContentPolicy {
    pub enabled: bool,
    pub cache_days: i64,
    pub cost_limit_usd: f64,
    pub cost_per_token: f64,
}

/// Cache-or-generate access to location copy
pub struct ContentService {
    store: Arc<dyn ContentStore>,
    generator: Arc<dyn ContentGenerator>,
    cache: Arc<CacheManager>,
    policy: ContentPolicy,
}

impl ContentService {
    pub fn new(
        store: Arc<dyn ContentStore>,
        generator: Arc<dyn ContentGenerator>,
        cache: Arc<CacheManager>,
        policy: ContentPolicy,
    ) -> Self {
        Self {
            store,
            generator,
            cache,
            policy,
        }
    }

    /// Cached content for a location, generating it on a miss
    ///
    /// Lookup order is process cache, then the content table (non-expired
    /// rows only), then the generation function. Fresh content is written
    /// back with the configured expiry. Nothing is retried.
    pub async fn get_or_generate(
        &self,
        kind: ContentKind,
        state: &StateInfo,
        city: Option<&str>,
    ) -> Result<LocationContent, ContentError> {
        let city_key = city.map(str::to_lowercase);
        let key = CacheKey::content(kind, &state.slug, city_key.as_deref());

        if let Ok(content) = self.cache.get::<LocationContent>(&key).await {
            return Ok(content);
        }

        let now = chrono::Utc::now();
        if let Some(content) = self
            .store
            .get_content(kind, &state.slug, city_key.as_deref())
            .await?
            .filter(|c| !c.is_expired(now))
        {
            self.remember(&key, &content).await;
            return Ok(content);
        }

        if !self.policy.enabled {
            return Err(ContentError::Disabled);
        }

        let payload = generation_payload(kind, state, city);
        let estimated = estimate_cost(&payload.to_string(), self.policy.cost_per_token);
        if estimated > self.policy.cost_limit_usd {
            return Err(ContentError::CostLimitExceeded {
                estimated,
                limit: self.policy.cost_limit_usd,
            });
        }

        tracing::info!(
            "Generating {} content for {} {} (estimated cost ${:.4})",
            kind.as_str(),
            state.name,
            city.unwrap_or_default(),
            estimated
        );

        let mut content = self.generator.generate(kind, &payload).await?;

        content.kind = kind;
        content.state = state.slug.clone();
        content.state_abbr = Some(state.abbr.clone());
        content.city = city_key;
        content.generated_at.get_or_insert(now);
        content.expires_at = Some(now + chrono::Duration::days(self.policy.cache_days));

        // The copy is still served when the write-back fails
        if let Err(e) = self.store.upsert_content(&content).await {
            tracing::warn!("Failed to store generated content for {}: {}", key, e);
        }
        self.remember(&key, &content).await;

        Ok(content)
    }

    async fn remember(&self, key: &str, content: &LocationContent) {
        if let Err(e) = self.cache.set(key, content).await {
            tracing::warn!("Failed to cache content {}: {}", key, e);
        }
    }
}

/// Client for the hosted content generation functions
pub struct GenerationClient {
    functions_url: String,
    api_key: String,
    client: Client,
}

impl GenerationClient {
    pub fn new(functions_url: &str, api_key: String, timeout: Duration) -> Result<Self, ContentError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            functions_url: functions_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }
}

#[async_trait]
impl ContentGenerator for GenerationClient {
    async fn generate(
        &self,
        kind: ContentKind,
        payload: &Value,
    ) -> Result<LocationContent, ContentError> {
        let url = format!("{}/{}", self.functions_url, kind.generator_function());

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ContentError::Generation(format!("{} - {}", status, text)));
        }

        let json: Value = response.json().await?;
        if let Some(error) = json.get("error").and_then(Value::as_str) {
            return Err(ContentError::Generation(error.to_string()));
        }

        let mut content: LocationContent = serde_json::from_value(json)
            .map_err(|e| ContentError::Generation(format!("Invalid content: {}", e)))?;
        content.kind = kind;

        if let Some(tokens) = content.generation_cost_tokens {
            tracing::debug!("Generation used {} tokens", tokens);
        }

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::LocationRegistry;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        rows: Mutex<Vec<LocationContent>>,
    }

    #[async_trait]
    impl ContentStore for MemoryStore {
        async fn get_content(
            &self,
            kind: ContentKind,
            state: &str,
            city: Option<&str>,
        ) -> Result<Option<LocationContent>, DatastoreError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.kind == kind && c.state == state && c.city.as_deref() == city)
                .cloned())
        }

        async fn upsert_content(&self, content: &LocationContent) -> Result<(), DatastoreError> {
            self.rows.lock().unwrap().push(content.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct StubGenerator {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ContentGenerator for StubGenerator {
        async fn generate(
            &self,
            kind: ContentKind,
            payload: &Value,
        ) -> Result<LocationContent, ContentError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let place = payload["city"]
                .as_str()
                .or(payload["stateName"].as_str())
                .unwrap_or_default()
                .to_string();
            let mut content = LocationContent::new(kind, "ignored", None);
            content.title = Some(format!("Counseling in {}", place));
            Ok(content)
        }
    }

    fn policy() -> ContentPolicy {
        ContentPolicy {
            enabled: true,
            cache_days: 30,
            cost_limit_usd: 0.50,
            cost_per_token: 0.0,
        }
    }

    #[tokio::test]
    async fn test_generation_client_surfaces_function_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/generate-city-content")
            .with_status(200)
            .with_body(r#"{"error":"quota exceeded"}"#)
            .create_async()
            .await;

        let client =
            GenerationClient::new(&server.url(), "key".to_string(), Duration::from_secs(5)).unwrap();
        let err = client
            .generate(ContentKind::City, &json!({ "city": "Austin" }))
            .await
            .unwrap_err();

        assert!(matches!(err, ContentError::Generation(ref m) if m == "quota exceeded"));
    }

    #[test]
    fn test_estimate_tokens() {
        assert_eq!(estimate_tokens(""), 2000);
        assert_eq!(estimate_tokens("abcd"), 2001);
        assert_eq!(estimate_tokens("abcde"), 2002);
        assert!((estimate_cost("abcd", 0.0001) - 0.2001).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_generates_once_then_serves_cached() {
        let store = Arc::new(MemoryStore::default());
        let generator = Arc::new(StubGenerator::default());
        let service = ContentService::new(
            store.clone(),
            generator.clone(),
            Arc::new(CacheManager::in_memory(10, 60)),
            policy(),
        );
        let registry = LocationRegistry::builtin();
        let texas = registry.state("texas").unwrap();

        let first = service
            .get_or_generate(ContentKind::City, texas, Some("Austin"))
            .await
            .unwrap();
        let second = service
            .get_or_generate(ContentKind::City, texas, Some("Austin"))
            .await
            .unwrap();

        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
        assert_eq!(first.city.as_deref(), Some("austin"));
        assert_eq!(second.title, first.title);
        assert!(first.expires_at.unwrap() > chrono::Utc::now() + chrono::Duration::days(29));
        assert_eq!(store.rows.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_cost_limit_blocks_generation() {
        let generator = Arc::new(StubGenerator::default());
        let mut strict = policy();
        strict.cost_per_token = 0.01;

        let service = ContentService::new(
            Arc::new(MemoryStore::default()),
            generator.clone(),
            Arc::new(CacheManager::in_memory(10, 60)),
            strict,
        );
        let registry = LocationRegistry::builtin();

        let err = service
            .get_or_generate(ContentKind::State, registry.state("ohio").unwrap(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, ContentError::CostLimitExceeded { .. }));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_expired_row_is_regenerated() {
        let store = Arc::new(MemoryStore::default());
        let mut stale = LocationContent::new(ContentKind::State, "ohio", None);
        stale.expires_at = Some(chrono::Utc::now() - chrono::Duration::days(1));
        store.rows.lock().unwrap().push(stale);

        let generator = Arc::new(StubGenerator::default());
        let service = ContentService::new(
            store,
            generator.clone(),
            Arc::new(CacheManager::in_memory(10, 60)),
            policy(),
        );
        let registry = LocationRegistry::builtin();

        service
            .get_or_generate(ContentKind::State, registry.state("ohio").unwrap(), None)
            .await
            .unwrap();
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }
}
