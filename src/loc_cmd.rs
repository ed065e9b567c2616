//! CLI command handler for `loc`.
//!
//! Extracts line provenance for the current checkout and writes the
//! dataset CSV.

use std::path::PathBuf;

use crate::core::config::{ExtractConfig, load_config};
use crate::extract;
use crate::git::GitClient;
use crate::storage::DatasetWriter;
use crate::{ScopeError, ScopeResult};

/// Run the `loc` command.
///
/// # Arguments
/// * `repo` - Repository root to extract from
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
    let records = extract::loc::extract(&git, &cfg, Some(&output))?;
    eprintln!("Extracted {} line record(s)", records.len());

    DatasetWriter::new().write_lines(&records, &output)?;
    eprintln!("Wrote dataset to: {}", output.display());
    Ok(())
}

/// Resolve the extraction config: file first, then the `--ext` override.
pub(crate) fn resolve_config(
    ext: Option<String>,
    config: Option<PathBuf>,
) -> ScopeResult<ExtractConfig> {
    let mut cfg = match config {
        Some(path) => load_config(&path)?,
        None => ExtractConfig::default(),
    };
    if let Some(list) = ext {
        cfg.extensions = ExtractConfig::from_ext_list(&list).extensions;
    }
    Ok(cfg)
}
