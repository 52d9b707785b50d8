//! Request validation for the record mutation routes
//!
//! Field validators and filters are composed into typed request bodies,
//! which the [`Validated`] extractor builds before a handler runs. The
//! store itself performs no validation.

pub mod extractor;
pub mod filters;
pub mod validators;

pub use extractor::{Validated, ValidatedBody};

use crate::core::error::ApiError;
use crate::core::record::RecordStatus;
use serde_json::Value;

const STATUS_VALUES: &[&str] = &["FLAGGED", "UNDER_REVIEW", "DISMISSED"];

fn field<'a>(payload: &'a Value, name: &str) -> &'a Value {
    payload.get(name).unwrap_or(&Value::Null)
}

/// Body of `PATCH /posts/{id}/status`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStatusRequest {
    pub status: RecordStatus,
}

impl ValidatedBody for UpdateStatusRequest {
    fn from_payload(payload: &Value) -> Result<Self, ApiError> {
        let value = field(payload, "status");
        validators::required()("status", value).map_err(ApiError::validation)?;
        validators::in_list(STATUS_VALUES)("status", value).map_err(ApiError::validation)?;

        let status = value
            .as_str()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| ApiError::validation("Invalid status"))?;

        Ok(Self { status })
    }
}

/// Body of `POST /posts/{id}/tags`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTagRequest {
    /// Trimmed, never empty
    pub tag: String,
}

impl ValidatedBody for AddTagRequest {
    fn from_payload(payload: &Value) -> Result<Self, ApiError> {
        let value = field(payload, "tag");
        validators::non_blank_string()("tag", value).map_err(ApiError::validation)?;

        let trimmed = filters::trim()("tag", value.clone());
        let tag = trimmed
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ApiError::validation("Tag is required"))?;

        Ok(Self { tag })
    }
}
