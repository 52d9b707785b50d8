//! The record store: filtered reads and serialized read-modify-write updates

use crate::core::error::StoreError;
use crate::core::query::{Page, RecordFilter, sort_newest_first};
use crate::core::record::{Record, RecordStatus};
use crate::core::service::{RecordService, StoreStats};
use crate::core::store::CollectionStorage;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Query and mutation engine over a [`CollectionStorage`]
///
/// Reads load a fresh snapshot and never lock. Every mutation runs
/// load + modify + persist inside one per-store critical section, so two
/// concurrent mutations cannot overwrite each other's change. Clones share
/// the storage and the critical section.
///
/// # Example
///
/// ```rust,ignore
/// let store = RecordStore::new(JsonFileStorage::new("mock-post.json"));
/// let page = store.query(&RecordFilter::new().with_status("FLAGGED")).await;
/// let record = store.add_tag(7, "health").await?;
/// ```
pub struct RecordStore<S: CollectionStorage> {
    storage: Arc<S>,
    write_lock: Arc<Mutex<()>>,
}

impl<S: CollectionStorage> Clone for RecordStore<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            write_lock: Arc::clone(&self.write_lock),
        }
    }
}

impl<S: CollectionStorage> RecordStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage: Arc::new(storage),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Locate `id`, apply `change` and persist when it reports a modification
    ///
    /// The in-memory collection is dropped on any failure, so a failed
    /// persist leaves nothing visible to the caller.
    async fn mutate<F>(
        &self,
        id: i64,
        operation: &'static str,
        change: F,
    ) -> Result<Record, StoreError>
    where
        F: FnOnce(&mut Record) -> bool + Send,
    {
        let _guard = self.write_lock.lock().await;

        let mut records = self.storage.load().await.map_err(|e| {
            error!(
                id,
                operation,
                storage = %self.storage.describe(),
                error = %format!("{:#}", e),
                "Failed to load records"
            );
            StoreError::unreadable(format!("{:#}", e))
        })?;

        let Some(index) = records.iter().position(|r| r.id == id) else {
            debug!(id, operation, "Record not found");
            return Err(StoreError::NotFound { id });
        };

        if !change(&mut records[index]) {
            debug!(id, operation, "Record unchanged, skipping persist");
            return Ok(records.swap_remove(index));
        }

        self.storage.persist(&records).await.map_err(|e| {
            error!(
                id,
                operation,
                storage = %self.storage.describe(),
                error = %format!("{:#}", e),
                "Failed to persist records"
            );
            StoreError::unwritable(format!("{:#}", e))
        })?;

        info!(id, operation, "Record updated");
        Ok(records.swap_remove(index))
    }
}

#[async_trait]
impl<S: CollectionStorage + 'static> RecordService for RecordStore<S> {
    async fn query(&self, filter: &RecordFilter) -> Page<Record> {
        let limit = filter.resolved_limit();
        let offset = filter.resolved_offset();

        let mut records = match self.storage.load().await {
            Ok(records) => records,
            Err(e) => {
                error!(
                    storage = %self.storage.describe(),
                    error = %format!("{:#}", e),
                    "Failed to load records, returning empty page"
                );
                return Page::empty(limit, offset);
            }
        };

        // Predicate evaluation is skipped when nothing is set; the sort is not.
        if filter.has_predicates() {
            let matcher = filter.matcher();
            records.retain(|r| matcher.matches(r));
        }

        sort_newest_first(&mut records);

        debug!(
            matched = records.len(),
            limit,
            offset,
            filtered = filter.has_predicates(),
            "Query evaluated"
        );

        Page::paginate(records, limit, offset)
    }

    async fn get(&self, id: i64) -> Option<Record> {
        match self.storage.load().await {
            Ok(records) => records.into_iter().find(|r| r.id == id),
            Err(e) => {
                warn!(id, error = %format!("{:#}", e), "Failed to load records for lookup");
                None
            }
        }
    }

    async fn set_status(&self, id: i64, status: RecordStatus) -> Result<Record, StoreError> {
        self.mutate(id, "set_status", |record| {
            record.status = status;
            true
        })
        .await
    }

    async fn add_tag(&self, id: i64, tag: &str) -> Result<Record, StoreError> {
        self.mutate(id, "add_tag", |record| record.push_tag(tag)).await
    }

    async fn remove_tag(&self, id: i64, tag: &str) -> Result<Record, StoreError> {
        self.mutate(id, "remove_tag", |record| {
            record.drop_tag(tag);
            true
        })
        .await
    }

    async fn stats(&self) -> StoreStats {
        match self.storage.load().await {
            Ok(records) => StoreStats {
                total_records: records.len(),
            },
            Err(e) => {
                warn!(error = %format!("{:#}", e), "Failed to load records for stats");
                StoreStats::default()
            }
        }
    }
}
