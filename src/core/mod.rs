//! Core types and schemas for commitscope.
//!
//! This module contains the dataset record schemas (line provenance and
//! per-commit file sizes) and the extraction configuration.

pub mod config;
pub mod schema;

// Re-export key types for convenience
pub use config::ExtractConfig;
pub use schema::{FileSizeRecord, LineRecord, SHORT_COMMIT_LEN, TimestampParts};
