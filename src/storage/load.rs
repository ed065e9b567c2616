//! Dataset loading: parse a serialized table back into typed records.
//!
//! This loader is purely the deserialization contract with the writer in
//! `storage::csv` as its single producer, so malformed rows are reported
//! as errors rather than skipped.

use std::path::Path;

use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

use crate::core::schema::{FileSizeRecord, LineRecord};
use crate::{ScopeError, ScopeResult};

/// Which dataset variant a CSV file holds, inferred from its header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    Lines,
    Sizes,
}

/// A line record with its timestamp columns parsed.
///
/// `date` is intentionally anchored to local midnight in the stated zone
/// while `datetime` carries the precise moment; both are retained and are
/// only required to be consistent to the minute.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedLine {
    pub rec: LineRecord,
    pub date: OffsetDateTime,
    pub datetime: OffsetDateTime,
}

/// A file-size record with its timestamp columns parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSize {
    pub rec: FileSizeRecord,
    pub date: OffsetDateTime,
    pub datetime: OffsetDateTime,
}

/// Peek at a CSV header row to decide which dataset variant it holds.
pub fn detect_kind(path: &Path) -> ScopeResult<DatasetKind> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| ScopeError::Message(format!("failed to open dataset: {e}")))?;
    let headers = reader
        .headers()
        .map_err(|e| ScopeError::Message(format!("failed to read header row: {e}")))?;
    match headers.iter().next() {
        Some("file") => Ok(DatasetKind::Lines),
        Some("commit") => Ok(DatasetKind::Sizes),
        other => Err(ScopeError::Message(format!(
            "unrecognized dataset header: {:?}",
            other
        ))),
    }
}

/// Load a line-provenance dataset.
pub fn load_lines(path: &Path) -> ScopeResult<Vec<LoadedLine>> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| ScopeError::Message(format!("failed to open dataset: {e}")))?;
    let mut rows = Vec::new();
    for (i, result) in reader.deserialize::<LineRecord>().enumerate() {
        let rec =
            result.map_err(|e| ScopeError::Message(format!("failed to parse row {}: {e}", i + 1)))?;
        rows.push(typed_line(rec)?);
    }
    Ok(rows)
}

/// Load a file-size dataset.
pub fn load_sizes(path: &Path) -> ScopeResult<Vec<LoadedSize>> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| ScopeError::Message(format!("failed to open dataset: {e}")))?;
    let mut rows = Vec::new();
    for (i, result) in reader.deserialize::<FileSizeRecord>().enumerate() {
        let rec =
            result.map_err(|e| ScopeError::Message(format!("failed to parse row {}: {e}", i + 1)))?;
        rows.push(typed_size(rec)?);
    }
    Ok(rows)
}

/// Attach parsed timestamps to a line record.
pub fn typed_line(rec: LineRecord) -> ScopeResult<LoadedLine> {
    let date = midnight_in_zone(&rec.date, &rec.timezone)?;
    let datetime = parse_datetime(&rec.datetime)?;
    Ok(LoadedLine { rec, date, datetime })
}

/// Attach parsed timestamps to a file-size record.
pub fn typed_size(rec: FileSizeRecord) -> ScopeResult<LoadedSize> {
    let date = midnight_in_zone(&rec.date, &rec.timezone)?;
    let datetime = parse_datetime(&rec.datetime)?;
    Ok(LoadedSize { rec, date, datetime })
}

/// Parse the full offset-qualified `datetime` column.
pub fn parse_datetime(s: &str) -> ScopeResult<OffsetDateTime> {
    OffsetDateTime::parse(s, &time::format_description::well_known::Rfc3339)
        .map_err(|e| ScopeError::Message(format!("invalid datetime {s:?}: {e}")))
}

/// Combine the `date` and `timezone` columns into local midnight in the
/// stated zone.
fn midnight_in_zone(date: &str, timezone: &str) -> ScopeResult<OffsetDateTime> {
    let date = Date::parse(date, format_description!("[year]-[month]-[day]"))
        .map_err(|e| ScopeError::Message(format!("invalid date {date:?}: {e}")))?;
    let offset = UtcOffset::parse(
        timezone,
        format_description!("[offset_hour sign:mandatory]:[offset_minute]"),
    )
    .map_err(|e| ScopeError::Message(format!("invalid timezone {timezone:?}: {e}")))?;
    Ok(PrimitiveDateTime::new(date, Time::MIDNIGHT).assume_offset(offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::DatasetWriter;

    fn sample_line() -> LineRecord {
        LineRecord {
            file: "global.js".to_string(),
            line: 10,
            category: "js".to_string(),
            commit: "c1".to_string(),
            author: "Al".to_string(),
            date: "2024-01-01".to_string(),
            time: "09:00:00".to_string(),
            timezone: "+00:00".to_string(),
            datetime: "2024-01-01T09:00:00+00:00".to_string(),
            depth: 0,
            length: 5,
        }
    }

    fn sample_size() -> FileSizeRecord {
        FileSizeRecord {
            commit: "c1".to_string(),
            file: "style.css".to_string(),
            size: 2048,
            category: "css".to_string(),
            date: "2024-03-05".to_string(),
            time: "18:30:00".to_string(),
            timezone: "-08:00".to_string(),
            datetime: "2024-03-05T18:30:00-08:00".to_string(),
        }
    }

    #[test]
    fn test_line_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loc.csv");
        DatasetWriter::new()
            .write_lines(&[sample_line()], &path)
            .unwrap();

        assert_eq!(detect_kind(&path).unwrap(), DatasetKind::Lines);
        let rows = load_lines(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].rec, sample_line());
        // Numeric columns coerced
        assert_eq!(rows[0].rec.line, 10);
        assert_eq!(rows[0].rec.length, 5);
    }

    #[test]
    fn test_size_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filesize.csv");
        DatasetWriter::new()
            .write_sizes(&[sample_size()], &path)
            .unwrap();

        assert_eq!(detect_kind(&path).unwrap(), DatasetKind::Sizes);
        let rows = load_sizes(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].rec.size, 2048);
    }

    #[test]
    fn test_date_anchors_to_midnight_in_zone() {
        let row = typed_size(sample_size()).unwrap();
        assert_eq!(row.date.hour(), 0);
        assert_eq!(row.date.minute(), 0);
        assert_eq!(row.date.offset(), UtcOffset::from_hms(-8, 0, 0).unwrap());
        // datetime keeps the precise moment
        assert_eq!(row.datetime.hour(), 18);
        assert_eq!(row.datetime.minute(), 30);
        // Same calendar day in the stated zone
        assert_eq!(row.date.date(), row.datetime.date());
    }

    #[test]
    fn test_quoted_field_roundtrip() {
        let mut rec = sample_line();
        rec.author = "Smith, Jr.".to_string();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loc.csv");
        DatasetWriter::new().write_lines(&[rec], &path).unwrap();

        let rows = load_lines(&path).unwrap();
        assert_eq!(rows[0].rec.author, "Smith, Jr.");
    }

    #[test]
    fn test_detect_kind_unknown_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weird.csv");
        std::fs::write(&path, "foo,bar\n1,2\n").unwrap();
        assert!(detect_kind(&path).is_err());
    }
}
