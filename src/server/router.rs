//! Route table for the entry gateway

use crate::server::handlers::{
    AppState, create_entry, delete_entries, delete_entry, favicon, health_check, list_entries,
    update_entry,
};
use axum::{
    Router,
    routing::{delete, get, post, put},
};

/// Build the entry CRUD routes
///
/// - GET /entries - List all entries, newest date first
/// - POST /add-entry - Create an entry
/// - PUT /edit-entry/{id} - Replace some fields of an entry
/// - DELETE /delete-entry/{id} - Delete an entry
/// - POST /delete-entries - Delete every entry in `{ "ids": [...] }`
pub fn build_entry_routes(state: AppState) -> Router {
    Router::new()
        .route("/entries", get(list_entries))
        .route("/add-entry", post(create_entry))
        .route("/edit-entry/{id}", put(update_entry))
        .route("/delete-entry/{id}", delete(delete_entry))
        .route("/delete-entries", post(delete_entries))
        .with_state(state)
}

/// Health checks and the empty favicon answer
pub fn build_utility_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/favicon.ico", get(favicon))
}
