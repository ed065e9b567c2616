//! Extraction configuration: which files count as tracked for the datasets.

use std::path::Path;

use serde::Deserialize;

use crate::{ScopeError, ScopeResult};

/// Directories never descended into during the line-provenance walk.
const DEFAULT_EXCLUDE_DIRS: &[&str] = &[".git", "node_modules", "target"];

/// Extension allow-list plus walk exclusions.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Lowercased extensions without the dot, e.g. `["js", "css"]`
    pub extensions: Vec<String>,
    pub exclude_dirs: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    extract: RawExtract,
}

#[derive(Debug, Deserialize)]
struct RawExtract {
    extensions: Vec<String>,
    #[serde(default)]
    exclude_dirs: Option<Vec<String>>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        ExtractConfig {
            extensions: vec!["js".to_string(), "css".to_string()],
            exclude_dirs: DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ExtractConfig {
    /// Build a config from a comma-separated extension list, e.g. `"js,css"`.
    pub fn from_ext_list(list: &str) -> Self {
        let extensions = list
            .split(',')
            .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        ExtractConfig {
            extensions,
            ..Default::default()
        }
    }

    /// Lowercased extension of a path, without the dot.
    pub fn extension_of(path: &Path) -> Option<String> {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
    }

    /// Whether a path is on the allow-list.
    pub fn matches(&self, path: &Path) -> bool {
        match Self::extension_of(path) {
            Some(ext) => self.extensions.iter().any(|e| *e == ext),
            None => false,
        }
    }

    /// The `type` column value for a path: the allow-listed extension, or
    /// `"other"` for anything else.
    pub fn category_for(&self, path: &Path) -> String {
        match Self::extension_of(path) {
            Some(ext) if self.extensions.iter().any(|e| *e == ext) => ext,
            _ => "other".to_string(),
        }
    }

    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.exclude_dirs.iter().any(|d| d == name)
    }
}

/// Load an `ExtractConfig` from a TOML file:
///
/// ```toml
/// [extract]
/// extensions = ["js", "css"]
/// exclude_dirs = [".git", "node_modules"]   # optional
/// ```
pub fn load_config(path: &Path) -> ScopeResult<ExtractConfig> {
    let s = std::fs::read_to_string(path).map_err(|e| ScopeError::Message(e.to_string()))?;
    let raw: RawConfig = toml::from_str(&s).map_err(|e| ScopeError::Message(e.to_string()))?;
    let extensions = raw
        .extract
        .extensions
        .into_iter()
        .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();
    let exclude_dirs = raw
        .extract
        .exclude_dirs
        .unwrap_or_else(|| DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect());
    Ok(ExtractConfig {
        extensions,
        exclude_dirs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allow_list() {
        let cfg = ExtractConfig::default();
        assert!(cfg.matches(Path::new("global.js")));
        assert!(cfg.matches(Path::new("style/main.CSS")));
        assert!(!cfg.matches(Path::new("index.html")));
        assert!(!cfg.matches(Path::new("README")));
    }

    #[test]
    fn test_category_for() {
        let cfg = ExtractConfig::default();
        assert_eq!(cfg.category_for(Path::new("a/b.js")), "js");
        assert_eq!(cfg.category_for(Path::new("a/b.html")), "other");
        assert_eq!(cfg.category_for(Path::new("Makefile")), "other");
    }

    #[test]
    fn test_from_ext_list() {
        let cfg = ExtractConfig::from_ext_list(".rs, toml,");
        assert_eq!(cfg.extensions, vec!["rs", "toml"]);
        assert!(cfg.is_excluded_dir(".git"));
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scope.toml");
        std::fs::write(
            &path,
            "[extract]\nextensions = [\"js\", \".Css\"]\nexclude_dirs = [\"vendor\"]\n",
        )
        .unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.extensions, vec!["js", "css"]);
        assert!(cfg.is_excluded_dir("vendor"));
        assert!(!cfg.is_excluded_dir(".git"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config(Path::new("/nonexistent/scope.toml"));
        assert!(result.is_err());
    }
}
