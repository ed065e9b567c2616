//! Temporal playback over the commit timeline.
//!
//! A slider position in `[0, 100]` maps onto the commit timestamp extent;
//! commits at or before the resulting cutoff are visible. The circle
//! radius domain is always computed from the full commit set so that dot
//! sizes stay comparable as the playback position moves.

use time::OffsetDateTime;

use crate::summary::schema::CommitSummary;
use crate::viz::brush::timestamp_extent;
use crate::viz::scale::TimeScale;

/// Upper end of the slider position range.
pub const SLIDER_MAX: f64 = 100.0;

/// Total units contributed to one file by the visible commits.
#[derive(Debug, Clone, PartialEq)]
pub struct FileUnits {
    pub file: String,
    pub total_units: u64,
}

/// What the playback UI shows for one slider position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackView {
    pub cutoff: OffsetDateTime,
    /// Ids of commits at or before the cutoff, in dataset order
    pub visible: Vec<String>,
    /// Radius scale domain over the FULL commit set's totals
    pub radius_domain: (u64, u64),
    /// Per-file totals over visible commits, largest first
    pub file_units: Vec<FileUnits>,
}

/// Map a slider position onto the commit timeline. Positions outside
/// `[0, 100]` are clamped.
pub fn cutoff_at(commits: &[CommitSummary], position: f64) -> OffsetDateTime {
    let scale = TimeScale::new(timestamp_extent(commits), (0.0, SLIDER_MAX));
    scale.invert(position.clamp(0.0, SLIDER_MAX))
}

/// Evaluate the playback state at a slider position.
pub fn evaluate_playback(commits: &[CommitSummary], position: f64) -> PlaybackView {
    let cutoff = cutoff_at(commits, position);
    let visible: Vec<&CommitSummary> = commits
        .iter()
        .filter(|c| c.datetime <= cutoff)
        .collect();

    PlaybackView {
        cutoff,
        visible: visible.iter().map(|c| c.id.clone()).collect(),
        radius_domain: units_extent(commits),
        file_units: file_units(&visible),
    }
}

fn units_extent(commits: &[CommitSummary]) -> (u64, u64) {
    let mut iter = commits.iter().map(|c| c.total_units);
    let Some(first) = iter.next() else {
        return (0, 0);
    };
    iter.fold((first, first), |(lo, hi), u| (lo.min(u), hi.max(u)))
}

/// Sum member units per file, ordered by descending total with ties broken
/// by file name.
fn file_units(visible: &[&CommitSummary]) -> Vec<FileUnits> {
    let mut totals: Vec<FileUnits> = Vec::new();
    for commit in visible {
        for member in &commit.members {
            match totals.iter_mut().find(|f| f.file == member.file) {
                Some(entry) => entry.total_units += member.units,
                None => totals.push(FileUnits {
                    file: member.file.clone(),
                    total_units: member.units,
                }),
            }
        }
    }
    totals.sort_by(|a, b| {
        b.total_units
            .cmp(&a.total_units)
            .then_with(|| a.file.cmp(&b.file))
    });
    totals
}
