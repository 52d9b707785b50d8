//! HTTP handlers for record operations
//!
//! Handlers translate between HTTP and [`RecordService`]; filtering,
//! pagination and persistence all happen behind the service.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use crate::core::error::ApiError;
use crate::core::query::{Page, QueryParams, parse_leading_int};
use crate::core::record::Record;
use crate::core::service::RecordService;
use crate::core::validation::{AddTagRequest, UpdateStatusRequest, Validated};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<dyn RecordService>,
}

impl AppState {
    pub fn new(records: Arc<dyn RecordService>) -> Self {
        Self { records }
    }
}

/// Parse a path id the lenient way; an unparsable id matches no record
fn record_id(raw: &str) -> Result<i64, ApiError> {
    parse_leading_int(raw).ok_or_else(ApiError::post_not_found)
}

/// List records with filters and pagination
///
/// GET /posts?status=&platform=&tag=&search=&limit=&offset=
pub async fn list_records(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Json<Page<Record>> {
    let filter = params.into_filter();
    Json(state.records.query(&filter).await)
}

/// Get a single record
///
/// GET /posts/{id}
pub async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Record>, ApiError> {
    let id = record_id(&id)?;
    state
        .records
        .get(id)
        .await
        .map(Json)
        .ok_or_else(ApiError::post_not_found)
}

/// Update a record's status
///
/// PATCH /posts/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Validated(body): Validated<UpdateStatusRequest>,
) -> Result<Json<Record>, ApiError> {
    let id = record_id(&id)?;
    let record = state.records.set_status(id, body.status).await?;
    Ok(Json(record))
}

/// Add a tag to a record
///
/// POST /posts/{id}/tags
pub async fn add_tag(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Validated(body): Validated<AddTagRequest>,
) -> Result<Json<Record>, ApiError> {
    let id = record_id(&id)?;
    let record = state.records.add_tag(id, &body.tag).await?;
    Ok(Json(record))
}

/// Remove a tag from a record
///
/// DELETE /posts/{id}/tags/{tag}
///
/// The tag segment is percent-decoded by the path extractor.
pub async fn remove_tag(
    State(state): State<AppState>,
    Path((id, tag)): Path<(String, String)>,
) -> Result<Json<Record>, ApiError> {
    let id = record_id(&id)?;
    let record = state.records.remove_tag(id, &tag).await?;
    Ok(Json(record))
}
