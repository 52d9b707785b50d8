//! Query parameters, record filtering and pagination

use crate::core::record::Record;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Page size used when `limit` is absent, zero or not a number
pub const DEFAULT_LIMIT: i64 = 20;

/// Raw query parameters as they arrive on the list route
///
/// Every field is kept as a string so malformed numbers degrade to the
/// defaults instead of rejecting the request.
///
/// # Example
/// ```rust,ignore
/// GET /api/posts?status=FLAGGED&platform=twit&limit=10&offset=20
/// GET /api/posts?tag=health&search=cure
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct QueryParams {
    pub status: Option<String>,
    pub platform: Option<String>,
    pub tag: Option<String>,
    pub search: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl QueryParams {
    /// Parse into the store's filter representation
    pub fn into_filter(self) -> RecordFilter {
        RecordFilter {
            status: self.status,
            platform: self.platform,
            tag: self.tag,
            search: self.search,
            limit: self.limit.as_deref().and_then(parse_leading_int),
            offset: self.offset.as_deref().and_then(parse_leading_int),
        }
    }
}

/// Parse the leading integer of `raw` (`"12abc"` is 12, `"abc"` is `None`).
///
/// Leading whitespace and a single sign are accepted. Values beyond the
/// `i64` range saturate.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let digits = &rest[..digits_len];
    let value = match digits.parse::<i64>() {
        Ok(v) if negative => -v,
        Ok(v) => v,
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    };
    Some(value)
}

/// Filter criteria for one query
///
/// Predicates are combined with AND. An empty string counts as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Exact, case-sensitive status match
    pub status: Option<String>,
    /// Case-insensitive substring of the platform
    pub platform: Option<String>,
    /// Case-insensitive substring of any tag
    pub tag: Option<String>,
    /// Case-insensitive substring of the text
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Limit after defaulting. Negative values are kept as given.
    pub fn resolved_limit(&self) -> i64 {
        self.limit.filter(|l| *l != 0).unwrap_or(DEFAULT_LIMIT)
    }

    /// Offset after defaulting. Negative values are kept as given.
    pub fn resolved_offset(&self) -> i64 {
        self.offset.unwrap_or(0)
    }

    /// Whether any predicate is set
    pub fn has_predicates(&self) -> bool {
        non_empty(&self.status).is_some()
            || non_empty(&self.platform).is_some()
            || non_empty(&self.tag).is_some()
            || non_empty(&self.search).is_some()
    }

    /// Build a matcher with the needles lowercased once
    pub fn matcher(&self) -> RecordMatcher<'_> {
        RecordMatcher {
            status: non_empty(&self.status),
            platform: non_empty(&self.platform).map(str::to_lowercase),
            tag: non_empty(&self.tag).map(str::to_lowercase),
            search: non_empty(&self.search).map(str::to_lowercase),
        }
    }
}

/// Conjunctive predicate over records, built by [`RecordFilter::matcher`]
#[derive(Debug)]
pub struct RecordMatcher<'a> {
    status: Option<&'a str>,
    platform: Option<String>,
    tag: Option<String>,
    search: Option<String>,
}

impl RecordMatcher<'_> {
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(status) = self.status
            && record.status.as_str() != status
        {
            return false;
        }

        if let Some(platform) = &self.platform
            && !record.platform.to_lowercase().contains(platform.as_str())
        {
            return false;
        }

        if let Some(tag) = &self.tag
            && !record
                .tags
                .iter()
                .any(|t| t.to_lowercase().contains(tag.as_str()))
        {
            return false;
        }

        if let Some(search) = &self.search
            && !record.text.to_lowercase().contains(search.as_str())
        {
            return false;
        }

        true
    }
}

/// Stable sort, most recent `created_at` first.
///
/// Records whose timestamp does not parse are placed after all others.
pub fn sort_newest_first(records: &mut [Record]) {
    records.sort_by_cached_key(|r| Reverse(r.created_instant()));
}

/// Half-open index window `[start, end)` for `offset`/`limit` over `len` items
///
/// Negative bounds count back from the end, out-of-range bounds are
/// clamped, and an inverted window is empty.
pub fn window(len: usize, offset: i64, limit: i64) -> (usize, usize) {
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    let resolve = |i: i64| {
        if i < 0 {
            len.saturating_add(i).max(0)
        } else {
            i.min(len)
        }
    };
    let start = resolve(offset);
    let end = resolve(offset.saturating_add(limit));
    if end <= start {
        (0, 0)
    } else {
        (start as usize, end as usize)
    }
}

/// One page of a filtered, sorted result set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    /// The items in this window
    pub data: Vec<T>,

    /// Number of matching items before pagination
    pub total: usize,

    pub limit: i64,

    pub offset: i64,

    /// Whether items exist past this window
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Empty page carrying the resolved window
    pub fn empty(limit: i64, offset: i64) -> Self {
        Self {
            data: Vec::new(),
            total: 0,
            limit,
            offset,
            has_more: false,
        }
    }

    /// Cut the window out of an already filtered and sorted set
    pub fn paginate(mut items: Vec<T>, limit: i64, offset: i64) -> Self {
        let total = items.len();
        let (start, end) = window(total, offset, limit);
        let data: Vec<T> = items.drain(start..end).collect();
        let total_i64 = i64::try_from(total).unwrap_or(i64::MAX);

        Self {
            data,
            total,
            limit,
            offset,
            has_more: offset.saturating_add(limit) < total_i64,
        }
    }
}
