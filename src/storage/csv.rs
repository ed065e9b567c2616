//! CSV serialization for extracted datasets.

use std::io::Write;
use std::path::Path;

use crate::ScopeError;
use crate::core::schema::{FileSizeRecord, LineRecord};

/// Column headers of the line-provenance dataset, in serialization order.
pub const LOC_HEADERS: &[&str] = &[
    "file", "line", "type", "commit", "author", "date", "time", "timezone", "datetime", "depth",
    "length",
];

/// Column headers of the file-size dataset, in serialization order.
pub const FILESIZE_HEADERS: &[&str] = &[
    "commit", "file", "size", "type", "date", "time", "timezone", "datetime",
];

/// Writer for extracted datasets.
///
/// Emits a flat CSV table with a deterministic column order, one header
/// row followed by one row per record in input order. Fields containing a
/// comma, quote or newline are quoted.
#[derive(Debug, Clone, Default)]
pub struct DatasetWriter;

impl DatasetWriter {
    /// Create a new DatasetWriter.
    pub fn new() -> Self {
        DatasetWriter
    }

    /// Write line records to a CSV file, creating parent directories as
    /// needed.
    ///
    /// # Errors
    /// Returns an error if file operations or CSV writing fails.
    pub fn write_lines(&self, records: &[LineRecord], output: &Path) -> Result<(), ScopeError> {
        let file = create_output(output)?;
        self.write_lines_to_writer(records, file)
    }

    /// Write file-size records to a CSV file, creating parent directories
    /// as needed.
    ///
    /// # Errors
    /// Returns an error if file operations or CSV writing fails.
    pub fn write_sizes(&self, records: &[FileSizeRecord], output: &Path) -> Result<(), ScopeError> {
        let file = create_output(output)?;
        self.write_sizes_to_writer(records, file)
    }

    /// Write line records to any writer implementing Write.
    pub fn write_lines_to_writer<W: Write>(
        &self,
        records: &[LineRecord],
        writer: W,
    ) -> Result<(), ScopeError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer
            .write_record(LOC_HEADERS)
            .map_err(|e| ScopeError::Message(format!("failed to write CSV headers: {e}")))?;

        for record in records {
            csv_writer
                .write_record(&self.line_to_row(record))
                .map_err(|e| ScopeError::Message(format!("failed to write CSV row: {e}")))?;
        }

        csv_writer
            .flush()
            .map_err(|e| ScopeError::Message(format!("failed to flush CSV writer: {e}")))?;

        Ok(())
    }

    /// Write file-size records to any writer implementing Write.
    pub fn write_sizes_to_writer<W: Write>(
        &self,
        records: &[FileSizeRecord],
        writer: W,
    ) -> Result<(), ScopeError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer
            .write_record(FILESIZE_HEADERS)
            .map_err(|e| ScopeError::Message(format!("failed to write CSV headers: {e}")))?;

        for record in records {
            csv_writer
                .write_record(&self.size_to_row(record))
                .map_err(|e| ScopeError::Message(format!("failed to write CSV row: {e}")))?;
        }

        csv_writer
            .flush()
            .map_err(|e| ScopeError::Message(format!("failed to flush CSV writer: {e}")))?;

        Ok(())
    }

    /// Convert a LineRecord to a row of CSV values.
    fn line_to_row(&self, record: &LineRecord) -> Vec<String> {
        vec![
            record.file.clone(),
            record.line.to_string(),
            record.category.clone(),
            record.commit.clone(),
            record.author.clone(),
            record.date.clone(),
            record.time.clone(),
            record.timezone.clone(),
            record.datetime.clone(),
            record.depth.to_string(),
            record.length.to_string(),
        ]
    }

    /// Convert a FileSizeRecord to a row of CSV values.
    fn size_to_row(&self, record: &FileSizeRecord) -> Vec<String> {
        vec![
            record.commit.clone(),
            record.file.clone(),
            record.size.to_string(),
            record.category.clone(),
            record.date.clone(),
            record.time.clone(),
            record.timezone.clone(),
            record.datetime.clone(),
        ]
    }
}

fn create_output(output: &Path) -> Result<std::fs::File, ScopeError> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ScopeError::Message(format!("failed to create directory: {e}")))?;
        }
    }
    std::fs::File::create(output)
        .map_err(|e| ScopeError::Message(format!("failed to create file: {e}")))
}
