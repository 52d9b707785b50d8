//! Core module containing the record model, query engine types and service traits

pub mod error;
pub mod query;
pub mod record;
pub mod service;
pub mod store;
pub mod validation;

pub use error::{ApiError, StoreError};
pub use query::{Page, QueryParams, RecordFilter};
pub use record::{Record, RecordStatus};
pub use service::{RecordService, StoreStats};
pub use store::CollectionStorage;
