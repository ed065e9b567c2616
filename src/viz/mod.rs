//! Headless interaction engine for the commit scatter plot.
//!
//! Nothing in here draws; these modules compute the state a front end
//! would render: plot scales, brush selections, and temporal playback.

pub mod brush;
pub mod scale;
pub mod slider;

pub use brush::{BrushRegion, CategoryShare, PlotScales, SelectionView, evaluate_selection};
pub use scale::{LinearScale, SqrtScale, TimeScale};
pub use slider::{FileUnits, PlaybackView, SLIDER_MAX, evaluate_playback};
