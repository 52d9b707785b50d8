//! Storage trait for the persisted record collection

use crate::core::record::Record;
use anyhow::Result;
use async_trait::async_trait;

/// Backing medium for the whole record collection
///
/// The collection is always read and replaced wholesale, never patched in
/// place. `load` and `persist` are the only points where a store operation
/// may suspend on I/O.
#[async_trait]
pub trait CollectionStorage: Send + Sync {
    /// Read the complete collection in storage order
    async fn load(&self) -> Result<Vec<Record>>;

    /// Replace the complete collection
    ///
    /// Implementations must leave either the previous or the new collection
    /// in place, never a partial document.
    async fn persist(&self, records: &[Record]) -> Result<()>;

    /// Short description for logs (a path, "memory", ...)
    fn describe(&self) -> String;
}
