use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub datastore: DatastoreSettings,
    #[serde(default)]
    pub tables: TableSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub site: SiteSettings,
    #[serde(default)]
    pub routing: RoutingSettings,
    #[serde(default)]
    pub leads: LeadSettings,
    #[serde(default)]
    pub content: ContentSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

/// Hosted datastore: REST tables plus edge functions under one project URL
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatastoreSettings {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
    /// Overrides `{url}/functions/v1`
    pub functions_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl DatastoreSettings {
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.url.trim_end_matches('/'))
    }

    pub fn functions_url(&self) -> String {
        self.functions_url
            .clone()
            .unwrap_or_else(|| format!("{}/functions/v1", self.url.trim_end_matches('/')))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(10))
    }

    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty() && !self.api_key.trim().is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableSettings {
    #[serde(default = "default_profiles_table")]
    pub profiles: String,
    #[serde(default = "default_content_table")]
    pub location_content: String,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            profiles: default_profiles_table(),
            location_content: default_content_table(),
        }
    }
}

fn default_profiles_table() -> String { "profiles".to_string() }
fn default_content_table() -> String { "city_content_cache".to_string() }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default)]
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    /// L1-only when absent
    pub redis_url: Option<String>,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteSettings {
    pub url: Option<String>,
    #[serde(default = "default_site_name")]
    pub name: String,
    #[serde(default = "default_site_description")]
    pub description: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            url: None,
            name: default_site_name(),
            description: default_site_description(),
        }
    }
}

fn default_site_name() -> String { "Wedding Counselors".to_string() }
fn default_site_description() -> String {
    "Find qualified premarital counselors, therapists and clergy near you. Prepare for a lasting marriage with professional premarital counseling.".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoutingSettings {
    #[serde(default = "default_lookup_timeout_ms")]
    pub profile_lookup_timeout_ms: u64,
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            profile_lookup_timeout_ms: default_lookup_timeout_ms(),
        }
    }
}

fn default_lookup_timeout_ms() -> u64 { 2500 }

#[derive(Debug, Clone, Deserialize)]
pub struct LeadSettings {
    #[serde(default = "default_min_recipients")]
    pub min_recipients: usize,
    #[serde(default = "default_max_recipients")]
    pub max_recipients: usize,
    #[serde(default = "default_dashboard_url")]
    pub dashboard_url: String,
    /// Log messages instead of calling the email function
    #[serde(default)]
    pub log_only: bool,
}

impl Default for LeadSettings {
    fn default() -> Self {
        Self {
            min_recipients: default_min_recipients(),
            max_recipients: default_max_recipients(),
            dashboard_url: default_dashboard_url(),
            log_only: false,
        }
    }
}

fn default_min_recipients() -> usize { 3 }
fn default_max_recipients() -> usize { 5 }
fn default_dashboard_url() -> String {
    "https://www.weddingcounselors.com/professional/analytics".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentSettings {
    #[serde(default = "default_content_enabled")]
    pub enabled: bool,
    #[serde(default = "default_cache_days")]
    pub cache_days: i64,
    #[serde(default = "default_cost_limit")]
    pub cost_limit_usd: f64,
    #[serde(default)]
    pub cost_per_token: f64,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            enabled: default_content_enabled(),
            cache_days: default_cache_days(),
            cost_limit_usd: default_cost_limit(),
            cost_per_token: 0.0,
        }
    }
}

fn default_content_enabled() -> bool { true }
fn default_cache_days() -> i64 { 30 }
fn default_cost_limit() -> f64 { 0.50 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

/// Well-known variables mapped onto config keys
const ENV_OVERRIDES: [(&str, &str); 6] = [
    ("DATABASE_URL", "database.url"),
    ("SUPABASE_URL", "datastore.url"),
    ("SUPABASE_SERVICE_ROLE_KEY", "datastore.api_key"),
    ("SITE_URL", "site.url"),
    ("SITE_NAME", "site.name"),
    ("SITE_DESCRIPTION", "site.description"),
];

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml), then config/local.toml
    /// 3. Environment variables (prefixed with DIRECTORY__)
    /// 4. Well-known variables such as DATABASE_URL and SUPABASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., DIRECTORY__SERVER__PORT -> server.port
            .add_source(directory_env())
            .build()?;

        apply_env_overrides(settings, |key| std::env::var(key).ok())?.try_deserialize()
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.routing.profile_lookup_timeout_ms)
    }
}

fn directory_env() -> Environment {
    Environment::with_prefix("DIRECTORY")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Layer the well-known variables over the loaded config
///
/// Blank values are ignored.
fn apply_env_overrides<F>(settings: Config, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut builder = Config::builder().add_source(settings);

    for (var, key) in ENV_OVERRIDES {
        if let Some(value) = lookup(var).filter(|v| !v.trim().is_empty()) {
            builder = builder.set_override(key, value)?;
        }
    }

    builder.build()
}
