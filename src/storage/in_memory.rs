//! In-memory implementation of CollectionStorage for testing and development

use crate::core::record::Record;
use crate::core::store::CollectionStorage;
use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// In-memory collection storage
///
/// Uses RwLock for thread-safe access. Clones share the same collection, so
/// a test can keep a handle while a store owns another. Reads and writes can
/// be made to fail, and a latency can be injected at both suspension points.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    records: Arc<RwLock<Vec<Record>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    persist_count: Arc<AtomicUsize>,
    latency: Option<Duration>,
}

impl InMemoryStorage {
    /// Create an empty in-memory collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection seeded with `records`
    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
            ..Self::default()
        }
    }

    /// Sleep this long before every load and persist
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful persists so far
    pub fn persist_count(&self) -> usize {
        self.persist_count.load(Ordering::SeqCst)
    }

    /// Current collection, bypassing failure injection
    pub fn snapshot(&self) -> Result<Vec<Record>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.clone())
    }

    async fn pause(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl CollectionStorage for InMemoryStorage {
    async fn load(&self) -> Result<Vec<Record>> {
        self.pause().await;

        if self.fail_reads.load(Ordering::SeqCst) {
            bail!("simulated read failure");
        }

        self.snapshot()
    }

    async fn persist(&self, records: &[Record]) -> Result<()> {
        self.pause().await;

        if self.fail_writes.load(Ordering::SeqCst) {
            bail!("simulated write failure");
        }

        let mut stored = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        *stored = records.to_vec();
        self.persist_count.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
