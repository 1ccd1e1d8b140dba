mod config;
mod core;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use config::Settings;
use core::QueryEngine;
use models::TenderRecord;
use routes::tenders::AppState;
use services::{FavoritesStore, StatsCache, TedClient, TedError, TenderStore, TokenVerifier};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

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
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap())
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

/// Load the tender corpus from the configured source.
async fn load_corpus(ted: &TedClient, settings: &Settings) -> Result<Vec<TenderRecord>, TedError> {
    if let Some(path) = &settings.ted.seed_file {
        info!("Loading tender corpus from seed file: {}", path);
        return TedClient::load_seed(path);
    }

    ted.fetch_notices(
        settings.ted.country.as_deref(),
        settings.ted.cpv_code.as_deref(),
        settings.ted.max_records,
    )
    .await
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting procurement intelligence service (log level: {})...", log_level);

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Initialize the TED connector and load the corpus; a failed fetch is
    // tolerated so the dashboards stay renderable with an empty corpus
    let ted = Arc::new(TedClient::new(
        settings.ted.api_url.clone(),
        settings.ted.timeout_secs,
        settings.ted.page_size,
    ));

    let records = match load_corpus(&ted, &settings).await {
        Ok(records) => records,
        Err(e) => {
            warn!("Failed to load tender corpus ({}), starting empty", e);
            vec![]
        }
    };

    info!("Loaded {} tender records", records.len());

    // Build the shared stores and engine
    let store = Arc::new(TenderStore::new(records));
    let engine = QueryEngine::new(store.clone());
    let favorites = Arc::new(FavoritesStore::new());
    let verifier = Arc::new(TokenVerifier::new(&settings.auth.secret_key));
    let stats_cache = Arc::new(StatsCache::new(
        settings.cache.capacity,
        settings.cache.ttl_secs,
    ));

    info!(
        "Stats cache initialized ({} entries, TTL: {}s)",
        settings.cache.capacity, settings.cache.ttl_secs
    );

    // Background corpus refresh: wholesale replace, never field-level edits
    if let Some(interval_secs) = settings.ted.refresh_interval_secs {
        let ted = ted.clone();
        let store = store.clone();
        let stats_cache = stats_cache.clone();
        let country = settings.ted.country.clone();
        let cpv_code = settings.ted.cpv_code.clone();
        let max_records = settings.ted.max_records;

        info!("Corpus refresh enabled every {}s", interval_secs);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
            interval.tick().await; // first tick fires immediately

            loop {
                interval.tick().await;
                match ted
                    .fetch_notices(country.as_deref(), cpv_code.as_deref(), max_records)
                    .await
                {
                    Ok(records) if !records.is_empty() => {
                        info!("Corpus refreshed: {} records", records.len());
                        store.replace(records);
                        stats_cache.invalidate_all();
                    }
                    Ok(_) => warn!("Corpus refresh returned no records, keeping current corpus"),
                    Err(e) => warn!("Corpus refresh failed: {}", e),
                }
            }
        });
    }

    // Build application state
    let app_state = AppState {
        store,
        engine,
        favorites,
        verifier,
        stats_cache,
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
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
