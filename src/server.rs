//! JSON HTTP surface over the catalog.
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /healthz` | `ok` |
//! | `GET /api/records?t=&c=&g=&m=&q=` | `{ "total": n, "records": [...] }` |
//! | `GET /api/records/{id}` | the record, or 404 |
//! | `GET /api/options` | filter vocabularies |
//!
//! Filtering runs inline in the handlers. Reading the data file does not:
//! until the store is loaded, the load runs on the blocking pool. The store is
//! shared through router state so every request sees the same cached catalog.

use anyhow::Context;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use dmcat_core::{filter_records, DamageRecord, FilterOptions, FilterState, LoadError, RecordStore};
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;

pub fn router(store: Arc<RecordStore>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/records", get(list_records))
        .route("/api/records/{id}", get(get_record))
        .route("/api/options", get(options))
        .with_state(store)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(store: Arc<RecordStore>, addr: &str) -> anyhow::Result<()> {
    // A failure here is not fatal: each request retries and reports it.
    if let Err(err) = ensure_loaded(&store).await {
        tracing::warn!(error = ?err, "catalog not available at startup");
    }

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(addr = %listener.local_addr()?, "serving damage mechanism catalog");
    axum::serve(listener, router(store)).await?;
    Ok(())
}

/// Load the catalog off the async workers. A no-op once it is cached.
async fn ensure_loaded(store: &Arc<RecordStore>) -> Result<(), ApiError> {
    if store.is_loaded() {
        return Ok(());
    }
    let store = Arc::clone(store);
    tokio::task::spawn_blocking(move || store.load().map(|_| ())).await??;
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct RecordList<'a> {
    total: usize,
    records: Vec<&'a DamageRecord>,
}

async fn healthz() -> &'static str {
    "ok"
}

async fn list_records(
    State(store): State<Arc<RecordStore>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let filter = FilterState::from_params(params);
    ensure_loaded(&store).await?;
    let records = filter_records(store.load()?, &filter);
    tracing::debug!(?filter, hits = records.len(), "record query");
    Ok(Json(RecordList {
        total: records.len(),
        records,
    })
    .into_response())
}

async fn get_record(
    State(store): State<Arc<RecordStore>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    ensure_loaded(&store).await?;
    match store.find(&id)? {
        Some(record) => Ok(Json(record).into_response()),
        None => Err(ApiError::NotFound(id)),
    }
}

async fn options(State(store): State<Arc<RecordStore>>) -> Result<Json<FilterOptions>, ApiError> {
    ensure_loaded(&store).await?;
    Ok(Json(FilterOptions::collect(store.load()?)))
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
enum ApiError {
    Load(LoadError),
    NotFound(String),
    Task(tokio::task::JoinError),
}

impl From<LoadError> for ApiError {
    fn from(err: LoadError) -> Self {
        ApiError::Load(err)
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Task(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Load(err) => {
                tracing::error!(error = %err, "catalog unavailable");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            ApiError::Task(err) => {
                tracing::error!(error = %err, "catalog load task failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "catalog load task failed".to_string())
            }
            ApiError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("no damage mechanism with id {id:?}"),
            ),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
