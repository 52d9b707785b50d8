//! # Flagged Posts
//!
//! A moderation-queue API over a flat collection of flagged records, kept in
//! a single JSON document.
//!
//! ## Features
//!
//! - **Compound filtering**: status, platform, tag and free-text search, combined with AND
//! - **Deterministic pagination**: stable newest-first sort before every window
//! - **Safe mutations**: status and tag updates run as serialized read-modify-write cycles
//! - **Atomic persistence**: the JSON document is replaced wholesale, never patched
//! - **Fail-soft reads**: an unreadable document lists as empty instead of erroring
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use flagged::prelude::*;
//!
//! let store = RecordStore::new(JsonFileStorage::new("mock-post.json"));
//!
//! let page = store
//!     .query(&RecordFilter::new().with_platform("twitter").with_limit(10))
//!     .await;
//!
//! let record = store.add_tag(7, "health").await?;
//! ```

pub mod config;
pub mod core;
pub mod records;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{ApiError, StoreError},
        query::{Page, QueryParams, RecordFilter},
        record::{Record, RecordStatus},
        service::{RecordService, StoreStats},
        store::CollectionStorage,
    };

    // === Store ===
    pub use crate::records::{RecordStore, handlers::AppState};

    // === Storage ===
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryStorage;
    pub use crate::storage::JsonFileStorage;

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use async_trait::async_trait;
}
