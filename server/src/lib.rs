use anyhow::{Context, Result};
use axum::{extract::{Path, Query, State}, http::{HeaderValue, Method, StatusCode}, routing::get, Json, Router};
use search_core::config::{DEFAULT_TOP_K, MAX_HTTP_TOP_K};
use search_core::{Corpus, CorpusStats, DocId, Loader, Metadata, SearchError, SearchHit, SearchMethod};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer, AllowOrigin};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { DEFAULT_TOP_K }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub method: SearchMethod,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct DocResponse<'a> {
    pub doc_id: DocId,
    pub text: &'a str,
    pub meta: Option<&'a Metadata>,
}

/// Shared read-only state. The corpus is fully built before the router exists.
#[derive(Clone)]
pub struct AppState {
    pub corpus: Arc<Corpus>,
}

/// Load the corpus at `input` and build the router over it.
pub fn build_app(input: &std::path::Path) -> Result<Router> {
    let start = std::time::Instant::now();
    let mut corpus = Corpus::new();
    let added = Loader::new()
        .load(input, &mut corpus)
        .with_context(|| format!("loading corpus from {}", input.display()))?;
    tracing::info!(docs = added, took_s = start.elapsed().as_secs_f64(), "corpus ready");
    Ok(router(Arc::new(corpus)))
}

pub fn router(corpus: Arc<Corpus>) -> Router {
    let cors = cors_layer(std::env::var("CORS_ALLOW_ORIGIN").ok().as_deref());
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .route("/stats", get(stats_handler))
        .with_state(AppState { corpus })
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Parse a comma-separated origin list, skipping blanks and invalid entries.
pub fn allowed_origins(list: &str) -> Vec<HeaderValue> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect()
}

/// Every route is a read, so only `GET` is allowed. Origins come from
/// `CORS_ALLOW_ORIGIN`; unset or unparseable means any origin.
pub fn cors_layer(origins: Option<&str>) -> CorsLayer {
    let origins = origins.map(allowed_origins).unwrap_or_default();
    let layer = CorsLayer::new().allow_methods([Method::GET]).allow_headers(Any);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let start = std::time::Instant::now();
    let method = match params.method.as_deref() {
        Some(m) => m.parse::<SearchMethod>().map_err(|e: SearchError| (StatusCode::BAD_REQUEST, e.to_string()))?,
        None => SearchMethod::default(),
    };
    let k = params.k.clamp(1, MAX_HTTP_TOP_K);
    let results = state
        .corpus
        .engine()
        .search(&params.q, method, k)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let elapsed = start.elapsed();
    tracing::debug!(query = %params.q, %method, hits = results.len(), "search served");
    Ok(Json(SearchResponse {
        query: params.q,
        method,
        took_s: elapsed.as_secs_f64(),
        total_hits: results.len(),
        results,
    }))
}

pub async fn doc_handler(
    State(state): State<AppState>,
    Path(doc_id): Path<DocId>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let repo = &state.corpus.repo;
    let text = repo
        .get(doc_id)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("doc {doc_id} not found")))?;
    let body = DocResponse { doc_id, text, meta: repo.meta(doc_id) };
    serde_json::to_value(body)
        .map(Json)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<CorpusStats> {
    Json(state.corpus.stats())
}
