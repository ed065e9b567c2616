//! Fold dataset rows into per-commit summaries.
//!
//! Grouping preserves the order commits are first encountered in the
//! dataset, and the group representative (author, timestamp) is the first
//! record of that commit. Dataset rows for one commit always carry the
//! same author and timestamp, so first-record-wins is not lossy.

use std::collections::HashMap;

use crate::storage::load::{LoadedLine, LoadedSize};
use crate::summary::schema::{CommitSummary, MemberRecord, hour_frac};

/// Aggregate a line-provenance dataset. Each record contributes one unit,
/// so `total_units` is the commit's surviving line count.
pub fn build_line_summaries(rows: &[LoadedLine]) -> Vec<CommitSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut summaries: Vec<CommitSummary> = Vec::new();

    for row in rows {
        let idx = *index.entry(&row.rec.commit).or_insert_with(|| {
            summaries.push(CommitSummary {
                id: row.rec.commit.clone(),
                author: row.rec.author.clone(),
                datetime: row.datetime,
                hour_frac: hour_frac(&row.datetime),
                total_units: 0,
                members: Vec::new(),
            });
            summaries.len() - 1
        });
        let summary = &mut summaries[idx];
        summary.total_units += 1;
        summary.members.push(MemberRecord {
            file: row.rec.file.clone(),
            category: row.rec.category.clone(),
            units: 1,
        });
    }

    summaries
}

/// Aggregate a file-size dataset. Each record contributes its byte size,
/// so `total_units` is the commit's tracked footprint in bytes.
pub fn build_size_summaries(rows: &[LoadedSize]) -> Vec<CommitSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut summaries: Vec<CommitSummary> = Vec::new();

    for row in rows {
        let idx = *index.entry(&row.rec.commit).or_insert_with(|| {
            summaries.push(CommitSummary {
                id: row.rec.commit.clone(),
                // File-size rows carry no author column
                author: String::new(),
                datetime: row.datetime,
                hour_frac: hour_frac(&row.datetime),
                total_units: 0,
                members: Vec::new(),
            });
            summaries.len() - 1
        });
        let summary = &mut summaries[idx];
        summary.total_units += row.rec.size;
        summary.members.push(MemberRecord {
            file: row.rec.file.clone(),
            category: row.rec.category.clone(),
            units: row.rec.size,
        });
    }

    summaries
}
