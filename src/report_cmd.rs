//! CLI command handler for `report`.
//!
//! Loads a dataset CSV, aggregates it into per-commit summaries, and
//! evaluates the playback filter at a slider position. The dataset variant
//! is inferred from the header row.

use std::path::PathBuf;

use crate::storage::load::{DatasetKind, detect_kind, load_lines, load_sizes};
use crate::summary::build::{build_line_summaries, build_size_summaries};
use crate::summary::schema::CommitSummary;
use crate::viz::slider::evaluate_playback;
use crate::{ScopeError, ScopeResult};

/// Run the `report` command.
///
/// # Arguments
/// * `input` - Dataset CSV to report on
/// * `position` - Slider position in `[0, 100]`
/// * `json` - Optional path to write the commit summaries as JSON
pub fn run(input: PathBuf, position: f64, json: Option<PathBuf>) -> ScopeResult<()> {
    if !input.exists() {
        return Err(ScopeError::Message(format!(
            "dataset not found: {}",
            input.display()
        )));
    }

    let kind = detect_kind(&input)?;
    let (summaries, unit_label) = match kind {
        DatasetKind::Lines => {
            let rows = load_lines(&input)?;
            eprintln!("Loaded {} line record(s)", rows.len());
            (build_line_summaries(&rows), "lines")
        }
        DatasetKind::Sizes => {
            let rows = load_sizes(&input)?;
            eprintln!("Loaded {} file-size record(s)", rows.len());
            (build_size_summaries(&rows), "bytes")
        }
    };

    let total: u64 = summaries.iter().map(|s| s.total_units).sum();
    println!("{} commit(s), {} {} total", summaries.len(), total, unit_label);

    let view = evaluate_playback(&summaries, position);
    println!(
        "At position {position}: {} of {} commit(s) visible",
        view.visible.len(),
        summaries.len()
    );
    for entry in &view.file_units {
        println!("  {} {} {}", entry.file, entry.total_units, unit_label);
    }

    if let Some(path) = json {
        write_json(&summaries, &path)?;
        eprintln!("Wrote summaries to: {}", path.display());
    }
    Ok(())
}

fn write_json(summaries: &[CommitSummary], path: &PathBuf) -> ScopeResult<()> {
    let out = serde_json::to_string_pretty(summaries)
        .map_err(|e| ScopeError::Message(format!("failed to serialize summaries: {e}")))?;
    std::fs::write(path, out)
        .map_err(|e| ScopeError::Message(format!("failed to write {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::LineRecord;
    use crate::storage::DatasetWriter;

    fn sample_records() -> Vec<LineRecord> {
        ["c1", "c1", "c2"]
            .iter()
            .enumerate()
            .map(|(i, commit)| LineRecord {
                file: "a.js".to_string(),
                line: (i + 1) as u32,
                category: "js".to_string(),
                commit: commit.to_string(),
                author: "Al".to_string(),
                date: "2024-01-01".to_string(),
                time: "09:00:00".to_string(),
                timezone: "+00:00".to_string(),
                datetime: "2024-01-01T09:00:00+00:00".to_string(),
                depth: 0,
                length: 5,
            })
            .collect()
    }

    #[test]
    fn test_report_over_line_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("loc.csv");
        DatasetWriter::new()
            .write_lines(&sample_records(), &input)
            .unwrap();

        run(input, 100.0, None).unwrap();
    }

    #[test]
    fn test_report_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("loc.csv");
        DatasetWriter::new()
            .write_lines(&sample_records(), &input)
            .unwrap();

        let json_path = dir.path().join("summaries.json");
        run(input, 50.0, Some(json_path.clone())).unwrap();

        let text = std::fs::read_to_string(&json_path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        let arr = parsed.as_array().unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(arr[0]["id"], "c1");
        assert_eq!(arr[0]["total_units"], 2);
        assert_eq!(arr[0]["hour_frac"], 9.0);
    }

    #[test]
    fn test_report_missing_input() {
        let result = run(PathBuf::from("/nonexistent/loc.csv"), 0.0, None);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }
}
