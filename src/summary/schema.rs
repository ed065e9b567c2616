//! Per-commit aggregate types.

use serde::Serialize;
use time::OffsetDateTime;

/// One dataset record folded into a commit group.
///
/// `units` is the record's contribution to the commit's total: 1 for a
/// line record, the stored byte size for a file-size record. Keeping the
/// member rows lets downstream views recompute category breakdowns and
/// per-file totals without going back to the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberRecord {
    pub file: String,
    pub category: String,
    pub units: u64,
}

/// Aggregate view of one commit across a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitSummary {
    /// Short commit id as stored in the dataset
    pub id: String,
    /// Author of the commit's first-encountered record
    pub author: String,
    /// Author timestamp of the commit's first-encountered record
    #[serde(with = "time::serde::rfc3339")]
    pub datetime: OffsetDateTime,
    /// Time of day as a fraction of hours, in the timestamp's own offset
    pub hour_frac: f64,
    /// Sum of member units
    pub total_units: u64,
    pub members: Vec<MemberRecord>,
}

/// Hour-of-day with the minutes folded in as a fraction, evaluated in the
/// offset the timestamp was recorded in. 09:30 local is 9.5 regardless of
/// zone.
pub fn hour_frac(dt: &OffsetDateTime) -> f64 {
    f64::from(dt.hour()) + f64::from(dt.minute()) / 60.0
}
