//! Dataset record schemas - the canonical row formats for both datasets.
//!
//! `LineRecord` and `FileSizeRecord` are write-once: they are produced in a
//! single batch pass over history and never mutated afterwards. Commit
//! summaries are always re-derived from these records on load.

use rand::Rng;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Commit ids are truncated to this prefix length for display. The short
/// form is not guaranteed globally unique across very large histories;
/// that is an accepted approximation of this dataset format.
pub const SHORT_COMMIT_LEN: usize = 8;

/// One record per physical line of a tracked file at the current checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineRecord {
    pub file: String,
    /// 1-indexed line number
    pub line: u32,
    /// Lowercased file extension without the dot ("other" if unmatched)
    #[serde(rename = "type")]
    pub category: String,
    /// Truncated commit id, or a random token when history is unavailable
    pub commit: String,
    pub author: String,
    pub date: String,
    pub time: String,
    pub timezone: String,
    /// Full offset-qualified timestamp; `date`/`time`/`timezone` are its parts
    pub datetime: String,
    pub depth: u32,
    /// Character count of the line content
    pub length: u32,
}

/// One record per (commit, tracked file) pair present in that commit's tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileSizeRecord {
    pub commit: String,
    pub file: String,
    /// Stored blob size in bytes
    pub size: u64,
    #[serde(rename = "type")]
    pub category: String,
    pub date: String,
    pub time: String,
    pub timezone: String,
    pub datetime: String,
}

/// An offset-qualified timestamp decomposed into the dataset's
/// `date`/`time`/`timezone`/`datetime` columns.
#[derive(Debug, Clone, PartialEq)]
pub struct TimestampParts {
    pub date: String,
    pub time: String,
    pub timezone: String,
    pub datetime: String,
}

impl TimestampParts {
    /// Split an ISO 8601 string into its column parts.
    ///
    /// Returns `None` if the string does not parse as an offset-qualified
    /// RFC 3339 timestamp.
    pub fn split(iso: &str) -> Option<Self> {
        let trimmed = iso.trim();
        let dt = OffsetDateTime::parse(trimmed, &Rfc3339).ok()?;
        if trimmed.len() < 19 {
            return None;
        }
        // RFC 3339 is ASCII, so byte slicing is safe after a successful parse.
        Some(TimestampParts {
            date: trimmed[..10].to_string(),
            time: trimmed[11..19].to_string(),
            timezone: format_offset(dt.offset()),
            datetime: trimmed.to_string(),
        })
    }

    /// Split an ISO string, falling back to the current local time when the
    /// string is absent or malformed.
    pub fn split_or_now(iso: Option<&str>) -> Self {
        iso.and_then(Self::split)
            .unwrap_or_else(Self::synthesize_now)
    }

    /// Synthesize parts for the current local time with a correctly
    /// formatted zone offset. Used when no attribution timestamp exists.
    pub fn synthesize_now() -> Self {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        Self::from_datetime(now)
    }

    fn from_datetime(dt: OffsetDateTime) -> Self {
        let date = format!("{:04}-{:02}-{:02}", dt.year(), u8::from(dt.month()), dt.day());
        let time = format!("{:02}:{:02}:{:02}", dt.hour(), dt.minute(), dt.second());
        let timezone = format_offset(dt.offset());
        let datetime = format!("{date}T{time}{timezone}");
        TimestampParts {
            date,
            time,
            timezone,
            datetime,
        }
    }
}

/// Format a UTC offset as `+HH:MM` / `-HH:MM`.
pub fn format_offset(offset: time::UtcOffset) -> String {
    let total_minutes = offset.whole_minutes();
    let sign = if total_minutes < 0 { '-' } else { '+' };
    let abs = total_minutes.unsigned_abs();
    format!("{sign}{:02}:{:02}", abs / 60, abs % 60)
}

/// Truncate a full commit id to the display prefix.
pub fn short_commit(full: &str) -> String {
    full[..full.len().min(SHORT_COMMIT_LEN)].to_string()
}

/// Random opaque token standing in for a commit id when no history exists.
pub fn fallback_token() -> String {
    format!("{:08x}", rand::thread_rng().r#gen::<u32>())
}
