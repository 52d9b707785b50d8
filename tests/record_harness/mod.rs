//! Shared test harness for record store testing
//!
//! Provides seeded collections and small helpers used by every integration
//! test file.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! mod record_harness;
//! use record_harness::*;
//! ```

#![allow(dead_code)]

use flagged::prelude::*;
use std::path::Path;

const PLATFORMS: [&str; 4] = ["Twitter", "Reddit", "Facebook", "TikTok"];

const TEXTS: [&str; 5] = [
    "This miracle cure will fix everything",
    "Click here for a free crypto giveaway",
    "Totally normal vacation photo",
    "Scam alert: send me your password",
    "Breaking news about the election",
];

const TAGS: [&[&str]; 5] = [
    &["health", "misinformation"],
    &["crypto", "spam"],
    &[],
    &["Scam", "phishing"],
    &["politics"],
];

/// Deterministic record `id` (1-based); a larger id is more recent
pub fn seeded_record(id: i64) -> Record {
    let i = (id - 1) as usize;
    Record::new(
        id,
        PLATFORMS[i % PLATFORMS.len()],
        TEXTS[i % TEXTS.len()],
        RecordStatus::ALL[i % RecordStatus::ALL.len()],
        TAGS[i % TAGS.len()].iter().map(|t| t.to_string()).collect(),
        format!("2024-01-{:02}T12:00:00.000Z", id),
    )
}

/// `count` records (at most 31), stored oldest first
pub fn seeded_records(count: i64) -> Vec<Record> {
    (1..=count).map(seeded_record).collect()
}

/// Records stored in an order unrelated to their timestamps, with ties
///
/// Ids 2, 4 and 6 share one timestamp, ids 3 and 5 another.
pub fn shuffled_records_with_ties() -> Vec<Record> {
    let stamp = |id: i64, created_at: &str| {
        let mut record = seeded_record(id);
        record.created_at = created_at.to_string();
        record
    };
    vec![
        stamp(4, "2024-03-01T00:00:00Z"),
        stamp(1, "2024-01-01T00:00:00Z"),
        stamp(5, "2024-02-01T00:00:00Z"),
        stamp(2, "2024-03-01T00:00:00Z"),
        stamp(7, "2024-04-01T00:00:00Z"),
        stamp(3, "2024-02-01T00:00:00Z"),
        stamp(6, "2024-03-01T01:00:00+01:00"),
    ]
}

/// A store over an in-memory collection, plus a handle on that collection
pub fn memory_store(records: Vec<Record>) -> (RecordStore<InMemoryStorage>, InMemoryStorage) {
    let storage = InMemoryStorage::with_records(records);
    (RecordStore::new(storage.clone()), storage)
}

/// Write `records` as a pretty JSON array at `path`
pub fn write_collection(path: &Path, records: &[Record]) {
    let json = serde_json::to_string_pretty(records).expect("records serialize");
    std::fs::write(path, json).expect("collection written");
}

pub fn ids(records: &[Record]) -> Vec<i64> {
    records.iter().map(|r| r.id).collect()
}

/// `created_at` never increases along `records`
pub fn assert_newest_first(records: &[Record]) {
    for pair in records.windows(2) {
        assert!(
            pair[0].created_instant() >= pair[1].created_instant(),
            "{} ({}) sorted before {} ({})",
            pair[0].id,
            pair[0].created_at,
            pair[1].id,
            pair[1].created_at
        );
    }
}
