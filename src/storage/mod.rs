//! Storage layer for extracted datasets.
//!
//! Datasets are flat CSV tables; `csv` writes them and `load` reads them
//! back with timestamps parsed.

pub mod csv;
pub mod load;

// Re-export key types
pub use csv::{DatasetWriter, FILESIZE_HEADERS, LOC_HEADERS};
pub use load::{DatasetKind, LoadedLine, LoadedSize, detect_kind, load_lines, load_sizes};
