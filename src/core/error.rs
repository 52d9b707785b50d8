//! Typed errors for the record store and the HTTP layer
//!
//! # Error Categories
//!
//! - [`StoreError`]: what a record mutation can fail with
//! - [`ApiError`]: what a handler answers with, including request validation
//!
//! Reads never produce a [`StoreError`]: listing degrades to an empty page
//! and id lookups degrade to "not found".
//!
//! # Example
//!
//! ```rust,ignore
//! match store.set_status(7, RecordStatus::Dismissed).await {
//!     Ok(record) => println!("now {}", record.status),
//!     Err(StoreError::NotFound { id }) => println!("no record {}", id),
//!     Err(e) => eprintln!("storage problem: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// Failure of a single-record operation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No record carries this id
    #[error("record with id '{id}' not found")]
    NotFound { id: i64 },

    /// The backing collection could not be loaded (missing, corrupt, I/O)
    #[error("storage unreadable: {message}")]
    StorageUnreadable { message: String },

    /// The mutated collection could not be written back
    #[error("storage unwritable: {message}")]
    StorageUnwritable { message: String },
}

impl StoreError {
    pub fn unreadable(err: impl fmt::Display) -> Self {
        StoreError::StorageUnreadable {
            message: err.to_string(),
        }
    }

    pub fn unwritable(err: impl fmt::Display) -> Self {
        StoreError::StorageUnwritable {
            message: err.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
            StoreError::StorageUnreadable { .. } | StoreError::StorageUnwritable { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::NotFound { .. } => "RECORD_NOT_FOUND",
            StoreError::StorageUnreadable { .. } => "STORAGE_UNREADABLE",
            StoreError::StorageUnwritable { .. } => "STORAGE_UNWRITABLE",
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Error code for programmatic handling
    pub code: String,
}

/// Errors returned by the HTTP handlers
#[derive(Debug)]
pub enum ApiError {
    /// Request body or path failed validation
    Validation { message: String },

    /// Record or route does not exist
    NotFound { message: String },

    /// Storage failure while mutating
    Storage(StoreError),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation { message } => write!(f, "{}", message),
            ApiError::NotFound { message } => write!(f, "{}", message),
            // Storage details stay in the logs
            ApiError::Storage(_) => write!(f, "Internal server error"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
        }
    }

    /// The 404 answered for an unknown record id
    pub fn post_not_found() -> Self {
        ApiError::NotFound {
            message: "Post not found".to_string(),
        }
    }

    pub fn route_not_found() -> Self {
        ApiError::NotFound {
            message: "Route not found".to_string(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Storage(e) => e.status_code(),
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "VALIDATION_ERROR",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Storage(e) => e.error_code(),
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            code: self.error_code().to_string(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::post_not_found(),
            other => ApiError::Storage(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_not_found_maps_to_404() {
        let err: ApiError = StoreError::NotFound { id: 99999 }.into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Post not found");
    }

    #[test]
    fn test_unwritable_is_distinct_from_not_found() {
        let err: ApiError = StoreError::unwritable("disk full").into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "STORAGE_UNWRITABLE");
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn test_store_error_display() {
        assert_eq!(
            StoreError::NotFound { id: 3 }.to_string(),
            "record with id '3' not found"
        );
        assert!(StoreError::NotFound { id: 3 }.is_not_found());
        assert!(!StoreError::unreadable("eof").is_not_found());
    }

    #[test]
    fn test_validation_response_body() {
        let body = ApiError::validation("Status is required").to_response();
        assert_eq!(body.error, "Status is required");
        assert_eq!(body.code, "VALIDATION_ERROR");
    }
}
