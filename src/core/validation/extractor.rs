//! Axum extractor for validated request bodies
//!
//! This module provides the `Validated<T>` extractor that validates and
//! filters a JSON payload before it reaches a handler.

use crate::core::error::ApiError;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde_json::{Map, Value};

/// A request body that can be built from a raw JSON payload
pub trait ValidatedBody: Sized {
    /// Validate the payload and build the typed body
    fn from_payload(payload: &Value) -> Result<Self, ApiError>;
}

/// Axum extractor that validates and filters a request body
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn add_tag(
///     Path(id): Path<String>,
///     Validated(body): Validated<AddTagRequest>,
/// ) -> Result<Json<Record>, ApiError> {
///     // body.tag is already trimmed and non-empty
/// }
/// ```
#[derive(Debug)]
pub struct Validated<T>(pub T);

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: ValidatedBody + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // A body that is not declared as JSON reads as `{}`, so the field
        // validators report what is missing
        let payload = match Json::<Value>::from_request(req, state).await {
            Ok(Json(payload)) => payload,
            Err(JsonRejection::MissingJsonContentType(_)) => Value::Object(Map::new()),
            Err(e) => {
                return Err(ApiError::validation(format!("Invalid JSON: {}", e.body_text())));
            }
        };

        T::from_payload(&payload).map(Validated)
    }
}
