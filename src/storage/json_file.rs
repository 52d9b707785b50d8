//! JSON document storage
//!
//! The whole collection lives in one JSON array on disk. Persisting writes a
//! sibling temporary file and renames it over the target, so a reader sees
//! either the old or the new document.

use crate::core::record::Record;
use crate::core::store::CollectionStorage;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// File-backed collection storage
///
/// # Example
///
/// ```rust,ignore
/// let storage = JsonFileStorage::new("mock-post.json");
/// let store = RecordStore::new(storage);
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path
            .with_extension(format!("{}.tmp", Uuid::new_v4().simple()))
    }
}

#[async_trait]
impl CollectionStorage for JsonFileStorage {
    async fn load(&self) -> Result<Vec<Record>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read {}", self.path.display()))?;

        let records: Vec<Record> = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;

        Ok(records)
    }

    async fn persist(&self, records: &[Record]) -> Result<()> {
        let payload =
            serde_json::to_string_pretty(records).context("failed to encode record collection")?;

        let temp_path = self.temp_path();
        if let Err(e) = tokio::fs::write(&temp_path, payload).await {
            return Err(e).with_context(|| format!("failed to write {}", temp_path.display()));
        }

        if let Err(e) = tokio::fs::rename(&temp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e).with_context(|| format!("failed to replace {}", self.path.display()));
        }

        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
