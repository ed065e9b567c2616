//! Per-commit file-size snapshots.
//!
//! Walks every commit reachable from all refs and records the stored blob
//! size of each allow-listed file present in that commit's tree. Per-file
//! resolution failures skip that file; commits without a resolvable
//! timestamp are skipped entirely. Only a total inability to enumerate
//! commits aborts the run.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::ScopeResult;
use crate::core::config::ExtractConfig;
use crate::core::schema::{FileSizeRecord, TimestampParts, short_commit};
use crate::git::GitClient;

/// Snapshot file sizes across the whole history.
pub fn snapshot(git: &GitClient, config: &ExtractConfig) -> ScopeResult<Vec<FileSizeRecord>> {
    let commits = git.all_commits()?;
    info!("snapshotting {} commit(s)", commits.len());

    let mut records = Vec::new();
    for commit in &commits {
        let Some(iso) = git.commit_iso(commit) else {
            warn!("skipping commit {}: timestamp unresolved", short_commit(commit));
            continue;
        };
        let parts = TimestampParts::split_or_now(Some(&iso));

        for file in git.files_at(commit) {
            let path = Path::new(&file);
            if !config.matches(path) {
                continue;
            }
            let Some(size) = git.blob_size(commit, &file) else {
                debug!("skipping {file} at {}: blob size unresolved", short_commit(commit));
                continue;
            };
            let category = config.category_for(path);
            records.push(FileSizeRecord {
                commit: short_commit(commit),
                file,
                size,
                category,
                date: parts.date.clone(),
                time: parts.time.clone(),
                timezone: parts.timezone.clone(),
                datetime: parts.datetime.clone(),
            });
        }
    }
    Ok(records)
}
