//! CLI command handler for `filesize`.
//!
//! Snapshots per-commit blob sizes across the whole history and writes the
//! dataset CSV.

use std::path::PathBuf;

use crate::extract;
use crate::git::GitClient;
use crate::loc_cmd::resolve_config;
use crate::storage::DatasetWriter;
use crate::{ScopeError, ScopeResult};

/// Run the `filesize` command.
///
/// # Arguments
/// * `repo` - Repository root to snapshot
/// * `output` - Path of the dataset CSV to write
/// * `ext` - Optional comma-separated extension allow-list
/// * `config` - Optional TOML config file
pub fn run(
    repo: PathBuf,
    output: PathBuf,
    ext: Option<String>,
    config: Option<PathBuf>,
) -> ScopeResult<()> {
    if !repo.is_dir() {
        return Err(ScopeError::Message(format!(
            "repository directory not found: {}",
            repo.display()
        )));
    }
    let cfg = resolve_config(ext, config)?;

    let git = GitClient::new(&repo);
    let records = extract::filesize::snapshot(&git, &cfg)?;
    eprintln!("Snapshotted {} file-size record(s)", records.len());

    DatasetWriter::new().write_sizes(&records, &output)?;
    eprintln!("Wrote dataset to: {}", output.display());
    Ok(())
}
