//! Exclusion policy applied during traversal.
//!
//! The scheduler consults [`ExcludePolicy::should_skip`] before queuing any
//! entry, so excluded files never reach a worker.

use std::path::Path;

use glob::Pattern;

use crate::error::PolylocError;
use crate::Result;

/// Which paths a scan should skip.
///
/// Built from a directory-name denylist, glob ignore patterns, and a
/// hidden-entry inclusion flag.
#[derive(Debug, Clone)]
pub struct ExcludePolicy {
    /// Directory names pruned from traversal (`node_modules`, `target`, ...)
    pub exclude_dirs: Vec<String>,
    /// Glob patterns matched against the full path
    pub ignore: Vec<Pattern>,
    /// Whether dot-prefixed files and directories are scanned
    pub include_hidden: bool,
}

impl Default for ExcludePolicy {
    fn default() -> Self {
        Self {
            exclude_dirs: Vec::new(),
            ignore: Vec::new(),
            include_hidden: false,
        }
    }
}

impl ExcludePolicy {
    /// Create a policy with no denylist, no globs, hidden entries skipped.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory name to the denylist.
    pub fn exclude_dir(mut self, name: impl Into<String>) -> Self {
        self.exclude_dirs.push(name.into());
        self
    }

    /// Add a glob ignore pattern. Invalid patterns fail fast before the
    /// scan starts.
    pub fn ignore(mut self, pattern: &str) -> Result<Self> {
        let pat = Pattern::new(pattern).map_err(|e| PolylocError::InvalidGlob {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        self.ignore.push(pat);
        Ok(self)
    }

    /// Include hidden files and directories.
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Whether traversal should skip this entry (and, for directories, the
    /// whole subtree below it).
    pub fn should_skip(&self, path: &Path, is_dir: bool) -> bool {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        if !self.include_hidden && name.starts_with('.') {
            return true;
        }

        if is_dir && self.exclude_dirs.iter().any(|d| d == name.as_ref()) {
            return true;
        }

        let path_str = path.to_string_lossy();
        self.ignore.iter().any(|p| p.matches(&path_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_skipped_by_default() {
        let policy = ExcludePolicy::new();
        assert!(policy.should_skip(Path::new("src/.hidden"), false));
        assert!(policy.should_skip(Path::new(".git"), true));
        assert!(!policy.should_skip(Path::new("src/main.rs"), false));
    }

    #[test]
    fn test_hidden_included_when_enabled() {
        let policy = ExcludePolicy::new().with_hidden(true);
        assert!(!policy.should_skip(Path::new(".env.c"), false));
        assert!(!policy.should_skip(Path::new(".config"), true));
    }

    #[test]
    fn test_dir_denylist_only_applies_to_dirs() {
        let policy = ExcludePolicy::new().exclude_dir("target");
        assert!(policy.should_skip(Path::new("proj/target"), true));
        // A *file* named "target" is not pruned by the denylist.
        assert!(!policy.should_skip(Path::new("proj/target"), false));
    }

    #[test]
    fn test_glob_ignore() {
        let policy = ExcludePolicy::new().ignore("**/generated/**").unwrap();
        assert!(policy.should_skip(Path::new("src/generated/api.rs"), false));
        assert!(!policy.should_skip(Path::new("src/api.rs"), false));
    }

    #[test]
    fn test_invalid_glob_fails_fast() {
        let result = ExcludePolicy::new().ignore("[invalid");
        assert!(result.is_err());
        if let Err(PolylocError::InvalidGlob { pattern, .. }) = result {
            assert_eq!(pattern, "[invalid");
        } else {
            panic!("expected InvalidGlob error");
        }
    }
}
