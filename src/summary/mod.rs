//! Commit aggregation over loaded datasets.

pub mod build;
pub mod schema;

pub use build::{build_line_summaries, build_size_summaries};
pub use schema::{CommitSummary, MemberRecord, hour_frac};
