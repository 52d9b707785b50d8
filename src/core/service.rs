//! Service trait for record operations

use crate::core::error::StoreError;
use crate::core::query::{Page, RecordFilter};
use crate::core::record::{Record, RecordStatus};
use async_trait::async_trait;
use serde::Serialize;

/// Collection statistics exposed by the health route
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub total_records: usize,
}

/// Service trait for the moderation record collection
///
/// This is the boundary the HTTP layer talks to. It takes plain data and
/// is agnostic to both the transport and the storage medium.
#[async_trait]
pub trait RecordService: Send + Sync {
    /// Filter, sort newest first and paginate
    ///
    /// Never fails: an unreadable collection yields an empty page.
    async fn query(&self, filter: &RecordFilter) -> Page<Record>;

    /// Get a record by id (`None` when absent or unreadable)
    async fn get(&self, id: i64) -> Option<Record>;

    /// Set a record's status and persist
    async fn set_status(&self, id: i64, status: RecordStatus) -> Result<Record, StoreError>;

    /// Append a tag unless an identical one exists
    ///
    /// An existing tag returns the record unchanged without persisting.
    async fn add_tag(&self, id: i64, tag: &str) -> Result<Record, StoreError>;

    /// Remove every occurrence of a tag and persist
    ///
    /// Removing a tag the record does not carry still succeeds.
    async fn remove_tag(&self, id: i64, tag: &str) -> Result<Record, StoreError>;

    /// Collection statistics (zero when unreadable)
    async fn stats(&self) -> StoreStats;
}
