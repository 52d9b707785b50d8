//! Router builder for record routes

use crate::records::handlers::{
    AppState, add_tag, get_record, list_records, remove_tag, update_status,
};
use axum::{
    Router,
    routing::{delete, get, patch, post},
};

/// Build record routes
///
/// - GET /posts - List records with filters and pagination
/// - GET /posts/{id} - Get a specific record
/// - PATCH /posts/{id}/status - Update a record's status
/// - POST /posts/{id}/tags - Add a tag
/// - DELETE /posts/{id}/tags/{tag} - Remove a tag
pub fn build_record_routes(state: AppState) -> Router {
    Router::new()
        .route("/posts", get(list_records))
        .route("/posts/{id}", get(get_record))
        .route("/posts/{id}/status", patch(update_status))
        .route("/posts/{id}/tags", post(add_tag))
        .route("/posts/{id}/tags/{tag}", delete(remove_tag))
        .with_state(state)
}
