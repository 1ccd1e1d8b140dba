use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::core::{summarize, QueryEngine};
use crate::models::{Corpus, HealthResponse, SearchQuery, SearchResponse, StatsQuery};
use crate::services::{CacheKey, FavoritesStore, StatsCache, TenderStore, TokenVerifier};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<TenderStore>,
    pub engine: QueryEngine,
    pub favorites: Arc<FavoritesStore>,
    pub verifier: Arc<TokenVerifier>,
    pub stats_cache: Arc<StatsCache>,
}

/// Configure the tender query routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/search", web::get().to(search_tenders))
        .route("/stats", web::get().to(get_statistics))
        .route("/awards", web::get().to(search_awards));
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        tenders_loaded: state.store.len(),
    })
}

/// Search open tenders
///
/// GET /api/search?country=DE&cpv_code=48&min_value=10000&max_value=500000&limit=100
async fn search_tenders(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> impl Responder {
    run_search(&state, query.into_inner(), Corpus::Tenders)
}

/// Search awarded contracts; same filter shape as /api/search
///
/// GET /api/awards
async fn search_awards(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> impl Responder {
    run_search(&state, query.into_inner(), Corpus::Awards)
}

fn run_search(state: &AppState, query: SearchQuery, corpus: Corpus) -> HttpResponse {
    let spec = query.into_spec();
    let tenders = state.engine.search(&spec, corpus);

    tracing::info!(
        "{} search returned {} records (limit {})",
        corpus.as_str(),
        tenders.len(),
        spec.limit
    );

    HttpResponse::Ok().json(SearchResponse {
        total: tenders.len(),
        filters: spec,
        tenders,
    })
}

/// Procurement statistics over the matched tender set
///
/// GET /api/stats?country=DE&cpv_code=48
async fn get_statistics(state: web::Data<AppState>, query: web::Query<StatsQuery>) -> impl Responder {
    let spec = query.into_inner().into_spec();
    let key = CacheKey::stats(Corpus::Tenders, &spec);

    if let Some(stats) = state.stats_cache.get(&key) {
        tracing::debug!("Stats cache hit: {}", key);
        return HttpResponse::Ok().json(stats.as_ref());
    }

    // Aggregates cover the whole matched set, not one result page
    let records = state.engine.matching(&spec, Corpus::Tenders);
    let stats = Arc::new(summarize(&records));
    state.stats_cache.insert(key, stats.clone());

    tracing::info!(
        "Computed statistics over {} records",
        stats.total_count
    );

    HttpResponse::Ok().json(stats.as_ref())
}
