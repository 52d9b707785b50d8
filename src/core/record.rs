//! The moderation record and its status

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Review state of a moderation record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordStatus {
    Flagged,
    UnderReview,
    Dismissed,
}

impl RecordStatus {
    /// All statuses, in display order
    pub const ALL: [RecordStatus; 3] = [
        RecordStatus::Flagged,
        RecordStatus::UnderReview,
        RecordStatus::Dismissed,
    ];

    /// Wire representation (`FLAGGED`, `UNDER_REVIEW`, `DISMISSED`)
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Flagged => "FLAGGED",
            RecordStatus::UnderReview => "UNDER_REVIEW",
            RecordStatus::Dismissed => "DISMISSED",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordStatus {
    type Err = String;

    /// Exact, case-sensitive match against the wire representation
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown status '{}'", s))
    }
}

/// Zoned ISO-8601 layouts tried after RFC 3339, with `Z` rewritten to `+00:00`
const ISO8601_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

fn parse_iso8601(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }

    let zoned = match raw.strip_suffix(['Z', 'z']) {
        Some(local) => format!("{}+00:00", local),
        None => raw.to_string(),
    };

    ISO8601_LAYOUTS
        .iter()
        .find_map(|layout| DateTime::parse_from_str(&zoned, layout).ok())
}

/// One moderation-queue item
///
/// `created_at` keeps the exact string read from storage so a
/// read-modify-write cycle never rewrites timestamps of untouched records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub platform: String,
    pub text: String,
    pub status: RecordStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: String,
}

impl Record {
    pub fn new(
        id: i64,
        platform: impl Into<String>,
        text: impl Into<String>,
        status: RecordStatus,
        tags: Vec<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id,
            platform: platform.into(),
            text: text.into(),
            status,
            tags,
            created_at: created_at.into(),
        }
    }

    /// Parsed creation instant
    ///
    /// Accepts RFC 3339 and the other ISO-8601 date-times that carry a zone:
    /// minute precision (`2024-06-01T10:30Z`) and colon-less offsets
    /// (`+0200`). `None` when the string is none of those.
    pub fn created_instant(&self) -> Option<DateTime<Utc>> {
        parse_iso8601(&self.created_at).map(|dt| dt.with_timezone(&Utc))
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Append `tag` unless an identical tag exists. Returns whether it was added.
    pub fn push_tag(&mut self, tag: &str) -> bool {
        if self.has_tag(tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Drop every occurrence of `tag`. Returns how many were removed.
    pub fn drop_tag(&mut self, tag: &str) -> usize {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        before - self.tags.len()
    }
}
