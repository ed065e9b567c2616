//! Read-only history queries against the `git` binary.
//!
//! commitscope shells out to `git` rather than linking a version-control
//! library: the extraction pass is dominated by process latency, not CPU,
//! and only needs history traversal, blob-size lookup, and blame-style
//! line attribution.

pub mod porcelain;

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::{ScopeError, ScopeResult};

/// Handle on a repository working directory for history queries.
#[derive(Debug, Clone)]
pub struct GitClient {
    repo_root: PathBuf,
}

impl GitClient {
    pub fn new(repo_root: impl AsRef<Path>) -> Self {
        GitClient {
            repo_root: repo_root.as_ref().to_path_buf(),
        }
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// Whether the working directory is inside a git repository.
    pub fn is_repo(&self) -> bool {
        self.run(&["rev-parse", "--is-inside-work-tree"]).is_some()
    }

    /// All commit ids reachable from all refs. Order across commits is
    /// unspecified. This is the only query whose failure is fatal.
    pub fn all_commits(&self) -> ScopeResult<Vec<String>> {
        let out = self
            .run(&["rev-list", "--all"])
            .ok_or_else(|| ScopeError::Message("cannot read git history".to_string()))?;
        Ok(out.lines().map(|l| l.trim().to_string()).collect())
    }

    /// Paths of all files present in a commit's tree. Empty on failure.
    pub fn files_at(&self, commit: &str) -> Vec<String> {
        match self.run(&["ls-tree", "-r", "--name-only", commit]) {
            Some(out) => out
                .lines()
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Stored size of a file's blob at a commit, resolved through the
    /// object referenced in the tree listing. `None` if either lookup fails.
    pub fn blob_size(&self, commit: &str, file: &str) -> Option<u64> {
        let listing = self.run(&["ls-tree", commit, "--", file])?;
        // "<mode> blob <sha>\t<path>"
        let sha = listing.split_whitespace().nth(2)?;
        let size = self.run(&["cat-file", "-s", sha])?;
        size.trim().parse().ok()
    }

    /// Author timestamp of a commit as a strict ISO 8601 string.
    pub fn commit_iso(&self, commit: &str) -> Option<String> {
        self.run(&["show", "-s", "--format=%aI", commit])
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Raw `git blame --line-porcelain` output for a file at the current
    /// checkout, or `None` when attribution is unavailable.
    pub fn blame(&self, file: &str) -> Option<String> {
        self.run(&["blame", "--line-porcelain", "--", file])
    }

    /// Run git with the given arguments and capture stdout.
    fn run(&self, args: &[&str]) -> Option<String> {
        Command::new("git")
            .args(args)
            .current_dir(&self.repo_root)
            .output()
            .ok()
            .filter(|o| o.status.success())
            .and_then(|o| String::from_utf8(o.stdout).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_repo_false_for_plain_dir() {
        let dir = tempfile::tempdir().unwrap();
        let git = GitClient::new(dir.path());
        assert!(!git.is_repo());
    }

    #[test]
    fn test_all_commits_fails_outside_repo() {
        let dir = tempfile::tempdir().unwrap();
        let git = GitClient::new(dir.path());
        let result = git.all_commits();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("cannot read git history")
        );
    }

    #[test]
    fn test_per_item_lookups_return_none_outside_repo() {
        let dir = tempfile::tempdir().unwrap();
        let git = GitClient::new(dir.path());
        assert!(git.files_at("deadbeef").is_empty());
        assert!(git.blob_size("deadbeef", "a.js").is_none());
        assert!(git.commit_iso("deadbeef").is_none());
        assert!(git.blame("a.js").is_none());
    }
}
