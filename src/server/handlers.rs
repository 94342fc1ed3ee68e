//! HTTP handlers for entry operations
//!
//! Each handler is a single request/response exchange: coerce the request,
//! make one store call, serialize the result. Failures are answered with a
//! status code and a short plain-text body (see [`EntryError`]).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::sync::Arc;

use crate::core::coerce::{patch_for_create, patch_for_update};
use crate::core::{DeleteSummary, Entry, EntryError, EntryId, EntryService, Operation};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub entry_service: Arc<dyn EntryService>,
}

impl AppState {
    pub fn new(entry_service: Arc<dyn EntryService>) -> Self {
        Self { entry_service }
    }
}

/// Request body for bulk deletion
#[derive(Debug, Deserialize)]
pub struct DeleteEntriesRequest {
    pub ids: Vec<String>,
}

fn parse_id(raw: &str) -> Result<EntryId, EntryError> {
    raw.parse().map_err(|_| EntryError::InvalidId {
        value: raw.to_string(),
    })
}

fn into_object(body: Value) -> Result<Map<String, Value>, EntryError> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(EntryError::InvalidBody {
            message: "expected a JSON object".to_string(),
        }),
    }
}

/// GET /entries
pub async fn list_entries(State(state): State<AppState>) -> Result<Json<Vec<Entry>>, EntryError> {
    tracing::info!("GET /entries");

    let entries = state
        .entry_service
        .list()
        .await
        .map_err(|e| EntryError::failed(Operation::List, e))?;

    Ok(Json(entries))
}

/// POST /add-entry
///
/// Numeric fields and `present` are coerced before the entry is stored.
pub async fn create_entry(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Entry>, EntryError> {
    tracing::debug!(%body, "POST /add-entry");

    let body = into_object(body)?;
    let patch =
        patch_for_create(&body).map_err(|e| EntryError::failed(Operation::Create, e.into()))?;

    let created = state
        .entry_service
        .create(Entry::from_patch(&patch))
        .await
        .map_err(|e| EntryError::failed(Operation::Create, e))?;

    tracing::info!(id = %created.id, "Entry created");
    Ok(Json(created))
}

/// PUT /edit-entry/{id}
///
/// Only the fields present in the body are replaced.
pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Entry>, EntryError> {
    tracing::debug!(%id, %body, "PUT /edit-entry");

    let entry_id = parse_id(&id)?;
    let body = into_object(body)?;
    let patch =
        patch_for_update(&body).map_err(|e| EntryError::failed(Operation::Update, e.into()))?;

    let updated = state
        .entry_service
        .update(&entry_id, &patch)
        .await
        .map_err(|e| EntryError::failed(Operation::Update, e))?
        .ok_or(EntryError::NotFound { id })?;

    tracing::info!(id = %updated.id, fields = patch.len(), "Entry updated");
    Ok(Json(updated))
}

/// DELETE /delete-entry/{id}
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Entry>, EntryError> {
    tracing::info!(%id, "DELETE /delete-entry");

    let entry_id = parse_id(&id)?;
    let deleted = state
        .entry_service
        .delete(&entry_id)
        .await
        .map_err(|e| EntryError::failed(Operation::Delete, e))?
        .ok_or(EntryError::NotFound { id })?;

    Ok(Json(deleted))
}

/// POST /delete-entries
///
/// Ids that match nothing, including ones that are not valid identifiers,
/// are ignored.
pub async fn delete_entries(
    State(state): State<AppState>,
    Json(request): Json<DeleteEntriesRequest>,
) -> Result<Json<DeleteSummary>, EntryError> {
    tracing::info!(ids = ?request.ids, "POST /delete-entries");

    let ids: Vec<EntryId> = request
        .ids
        .iter()
        .filter_map(|raw| raw.parse().ok())
        .collect();

    let summary = state
        .entry_service
        .delete_many(&ids)
        .await
        .map_err(|e| EntryError::failed(Operation::DeleteMany, e))?;

    tracing::info!(deleted = summary.deleted_count, "Entries deleted");
    Ok(Json(summary))
}

/// GET /favicon.ico
pub async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "entry-ledger"
    }))
}
