//! Dataset extraction: a synchronous, single-pass batch job per invocation.
//!
//! Re-running either extractor regenerates its dataset deterministically
//! from the same history state.

pub mod filesize;
pub mod loc;

pub use filesize::snapshot;
pub use loc::extract;
