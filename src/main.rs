use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use counselor_directory::config::Settings;
use counselor_directory::core::{LeadDistributor, LeadPolicy, RouteResolver, SiteInfo};
use counselor_directory::registry::Registries;
use counselor_directory::routes::{self, AppState};
use counselor_directory::services::{
    CacheManager, ContentPolicy, ContentService, DatastoreClient, DatastoreTables, DirectoryService,
    EmailFunctionClient, GenerationClient, LogNotifier, Notifier, PostgresClient,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)).json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

fn init_logging(level: &str, format: &str) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

fn startup_error(what: &str, err: impl std::fmt::Display) -> std::io::Error {
    error!("Failed to initialize {}: {}", what, err);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", what, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_logging("info", "json");
            return Err(startup_error("configuration", e));
        }
    };

    init_logging(&settings.logging.level, &settings.logging.format);
    info!("Starting counselor directory service...");

    let registries = Arc::new(Registries::builtin());
    let site = Arc::new(SiteInfo::new(
        settings.site.url.as_deref(),
        settings.site.name.clone(),
        settings.site.description.clone(),
    ));

    info!(
        "Registries loaded ({} states, {} specialties), canonical site {}",
        registries.locations.states().len(),
        registries.specialties.all().len(),
        site.url
    );

    // Cache: Redis is optional, L1 always on
    let cache_ttl = settings.cache.ttl_secs.unwrap_or(300);
    let l1_cache_size = settings.cache.l1_cache_size.unwrap_or(1000);
    let cache = Arc::new(CacheManager::connect(settings.cache.redis_url.as_deref(), l1_cache_size, cache_ttl).await);

    info!("Cache manager initialized (L1: {} entries, TTL: {}s)", l1_cache_size, cache_ttl);

    // Datastore client for profiles and generated content
    if !settings.datastore.is_configured() {
        return Err(startup_error(
            "datastore",
            "SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY must be set",
        ));
    }

    let timeout = settings.datastore.timeout();
    let functions_url = settings.datastore.functions_url();
    let api_key = settings.datastore.api_key.clone();

    let datastore = Arc::new(
        DatastoreClient::new(
            settings.datastore.rest_url(),
            api_key.clone(),
            DatastoreTables {
                profiles: settings.tables.profiles.clone(),
                location_content: settings.tables.location_content.clone(),
            },
            timeout,
        )
        .map_err(|e| startup_error("datastore client", e))?,
    );

    info!("Datastore client initialized ({})", settings.datastore.rest_url());

    let directory = Arc::new(DirectoryService::new(datastore.clone(), cache.clone()));
    let resolver = Arc::new(RouteResolver::new(
        registries.clone(),
        directory.clone(),
        settings.lookup_timeout(),
    ));

    let generator = Arc::new(
        GenerationClient::new(&functions_url, api_key.clone(), timeout)
            .map_err(|e| startup_error("content generator", e))?,
    );
    let content = Arc::new(ContentService::new(
        datastore.clone(),
        generator,
        cache.clone(),
        ContentPolicy {
            enabled: settings.content.enabled,
            cache_days: settings.content.cache_days,
            cost_limit_usd: settings.content.cost_limit_usd,
            cost_per_token: settings.content.cost_per_token,
        },
    ));

    // Initialize PostgreSQL client
    let db_max_conn = settings.database.max_connections.unwrap_or(10);

    let postgres = Arc::new(
        PostgresClient::from_settings(
            &settings.database.url,
            Some(db_max_conn),
            settings.database.min_connections,
            settings.database.acquire_timeout_secs,
            settings.database.idle_timeout_secs,
        )
        .await
        .map_err(|e| startup_error("PostgreSQL", e))?,
    );

    info!("PostgreSQL client initialized (max: {} connections)", db_max_conn);

    let notifier: Arc<dyn Notifier> = if settings.leads.log_only {
        info!("Email delivery disabled, inquiries will be logged only");
        Arc::new(LogNotifier)
    } else {
        Arc::new(
            EmailFunctionClient::new(&functions_url, api_key, timeout)
                .map_err(|e| startup_error("email client", e))?,
        )
    };

    let distributor = Arc::new(LeadDistributor::new(
        postgres.clone(),
        notifier,
        LeadPolicy {
            min_recipients: settings.leads.min_recipients,
            max_recipients: settings.leads.max_recipients,
            dashboard_url: settings.leads.dashboard_url.clone(),
        },
    ));

    info!(
        "Lead distributor initialized ({}-{} recipients)",
        settings.leads.min_recipients, settings.leads.max_recipients
    );

    // Build application state
    let app_state = AppState {
        registries,
        site,
        resolver,
        directory,
        content,
        distributor,
        inquiries: postgres,
        cache,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
