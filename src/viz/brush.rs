//! Rectangular brush selection over the commit scatter.
//!
//! Commits are plotted with their timestamp on the x axis and their
//! hour-of-day fraction on the y axis. A brush region selects every commit
//! whose plotted point falls inside it, boundaries included, and the
//! selection is summarized as a label plus a per-category breakdown of the
//! selected commits' member records.

use time::OffsetDateTime;

use crate::summary::schema::CommitSummary;
use crate::viz::scale::{LinearScale, TimeScale};

/// A brush rectangle in plot coordinates. Corners may be given in any
/// order; containment tests normalize them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushRegion {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BrushRegion {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        BrushRegion { x0, y0, x1, y1 }
    }

    fn contains(&self, x: f64, y: f64) -> bool {
        let (xa, xb) = ordered(self.x0, self.x1);
        let (ya, yb) = ordered(self.y0, self.y1);
        xa <= x && x <= xb && ya <= y && y <= yb
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// The coordinate system commits are plotted in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotScales {
    pub x: TimeScale,
    pub y: LinearScale,
}

impl PlotScales {
    /// Scales for a plot of the given pixel size: x spans the commits'
    /// timestamp extent, y spans the 24-hour day top-down.
    pub fn for_commits(commits: &[CommitSummary], width: f64, height: f64) -> Self {
        let extent = timestamp_extent(commits);
        PlotScales {
            x: TimeScale::new(extent, (0.0, width)),
            y: LinearScale::new((0.0, 24.0), (height, 0.0)),
        }
    }

    fn position(&self, commit: &CommitSummary) -> (f64, f64) {
        (self.x.scale(commit.datetime), self.y.scale(commit.hour_frac))
    }
}

/// Earliest and latest commit timestamps; the epoch twice when empty.
pub(crate) fn timestamp_extent(commits: &[CommitSummary]) -> (OffsetDateTime, OffsetDateTime) {
    let mut iter = commits.iter().map(|c| c.datetime);
    let Some(first) = iter.next() else {
        return (OffsetDateTime::UNIX_EPOCH, OffsetDateTime::UNIX_EPOCH);
    };
    iter.fold((first, first), |(lo, hi), dt| (lo.min(dt), hi.max(dt)))
}

/// Whether a commit's plotted point lies inside the brush, inclusive of
/// the region's edges.
pub fn commit_selected(scales: &PlotScales, region: &BrushRegion, commit: &CommitSummary) -> bool {
    let (x, y) = scales.position(commit);
    region.contains(x, y)
}

/// One category's share of the selected member records.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub count: u64,
    /// Percentage of all selected member records, rounded to one decimal
    pub percent: f64,
}

/// What the selection UI shows for the current brush state.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionView {
    /// Ids of selected commits, in dataset order
    pub selected: Vec<String>,
    pub label: String,
    /// Per-category breakdown in first-encounter order; empty when no
    /// commit is selected
    pub breakdown: Vec<CategoryShare>,
}

/// Evaluate a brush state against the commit set. `None` means no brush
/// is active, which reads the same as an empty selection.
pub fn evaluate_selection(
    commits: &[CommitSummary],
    scales: &PlotScales,
    region: Option<&BrushRegion>,
) -> SelectionView {
    let selected: Vec<&CommitSummary> = match region {
        Some(r) => commits
            .iter()
            .filter(|c| commit_selected(scales, r, c))
            .collect(),
        None => Vec::new(),
    };

    let label = if selected.is_empty() {
        "No commits selected".to_string()
    } else {
        format!("{} commits selected", selected.len())
    };

    SelectionView {
        selected: selected.iter().map(|c| c.id.clone()).collect(),
        label,
        breakdown: category_breakdown(&selected),
    }
}

fn category_breakdown(selected: &[&CommitSummary]) -> Vec<CategoryShare> {
    let mut shares: Vec<CategoryShare> = Vec::new();
    let mut total: u64 = 0;

    for commit in selected {
        for member in &commit.members {
            total += 1;
            match shares.iter_mut().find(|s| s.category == member.category) {
                Some(share) => share.count += 1,
                None => shares.push(CategoryShare {
                    category: member.category.clone(),
                    count: 1,
                    percent: 0.0,
                }),
            }
        }
    }

    for share in &mut shares {
        let pct = share.count as f64 / total as f64 * 100.0;
        share.percent = (pct * 10.0).round() / 10.0;
    }
    shares
}
