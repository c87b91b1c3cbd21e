//! Ignore patterns value object
//!
//! Loads a `.forceignore`-style file from a tree root and matches relative
//! paths against it with gitignore semantics.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Maximum ignore file size (64KB)
const MAX_FILE_SIZE: u64 = 65536;

/// Maximum number of patterns allowed
const MAX_PATTERNS: usize = 1000;

/// Default name of the ignore file looked up at a tree root
pub const DEFAULT_IGNORE_FILE: &str = ".forceignore";

/// Patterns loaded from an ignore file.
#[derive(Debug)]
pub struct IgnorePatterns {
    matcher: Gitignore,
    pattern_count: usize,
}

impl Default for IgnorePatterns {
    fn default() -> Self {
        Self::empty()
    }
}

impl IgnorePatterns {
    /// Create an empty pattern set (matches nothing).
    pub fn empty() -> Self {
        Self {
            matcher: Gitignore::empty(),
            pattern_count: 0,
        }
    }

    /// Load `file_name` from `root`.
    ///
    /// Returns `Ok(empty)` if the file doesn't exist.
    pub fn load(root: &Path, file_name: &str) -> Result<Self, IgnoreError> {
        let ignore_path = root.join(file_name);

        if !ignore_path.is_file() {
            return Ok(Self::empty());
        }

        let metadata = fs::metadata(&ignore_path).map_err(IgnoreError::Io)?;
        if metadata.len() > MAX_FILE_SIZE {
            return Err(IgnoreError::FileTooLarge {
                path: ignore_path,
                size: metadata.len(),
                limit: MAX_FILE_SIZE,
            });
        }

        let content = fs::read_to_string(&ignore_path).map_err(IgnoreError::Io)?;
        Self::from_content(root, &ignore_path, &content)
    }

    /// Parse patterns from string content.
    pub fn from_content(
        root: &Path,
        source_path: &Path,
        content: &str,
    ) -> Result<Self, IgnoreError> {
        let mut builder = GitignoreBuilder::new(root);
        let mut pattern_count = 0;

        for (line_num, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            pattern_count += 1;
            if pattern_count > MAX_PATTERNS {
                return Err(IgnoreError::TooManyPatterns {
                    path: source_path.to_path_buf(),
                    count: pattern_count,
                    limit: MAX_PATTERNS,
                });
            }

            if let Err(e) = builder.add_line(Some(source_path.to_path_buf()), line) {
                return Err(IgnoreError::InvalidPattern {
                    path: source_path.to_path_buf(),
                    line: line_num + 1,
                    pattern: line.to_string(),
                    message: e.to_string(),
                });
            }
        }

        let matcher = builder
            .build()
            .map_err(|e| IgnoreError::BuildFailed(e.to_string()))?;

        Ok(Self {
            matcher,
            pattern_count,
        })
    }

    /// Check if a tree-relative file path should be ignored.
    pub fn is_ignored(&self, rel_path: &Path) -> bool {
        self.pattern_count > 0
            && self
                .matcher
                .matched_path_or_any_parents(rel_path, false)
                .is_ignore()
    }

    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    pub fn is_empty(&self) -> bool {
        self.pattern_count == 0
    }
}

/// Errors that can occur when loading ignore patterns.
#[derive(Debug, Error)]
pub enum IgnoreError {
    #[error("ignore file exceeds {}KB limit ({size} bytes): {}", .limit / 1024, .path.display())]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("ignore file has {count} patterns, exceeds {limit} limit: {}", .path.display())]
    TooManyPatterns {
        path: PathBuf,
        count: usize,
        limit: usize,
    },

    #[error("invalid pattern at {}:{line}: '{pattern}' - {message}", .path.display())]
    InvalidPattern {
        path: PathBuf,
        line: usize,
        pattern: String,
        message: String,
    },

    #[error("failed to build ignore matcher: {0}")]
    BuildFailed(String),

    #[error("IO error reading ignore file: {0}")]
    Io(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn patterns(content: &str) -> IgnorePatterns {
        IgnorePatterns::from_content(
            Path::new("/project"),
            Path::new("/project/.forceignore"),
            content,
        )
        .unwrap()
    }

    #[test]
    fn empty_patterns_match_nothing() {
        let patterns = IgnorePatterns::empty();
        assert!(!patterns.is_ignored(Path::new("classes/Foo.cls")));
        assert!(patterns.is_empty());
    }

    #[test]
    fn missing_file_returns_empty() {
        let dir = tempdir().unwrap();
        let patterns = IgnorePatterns::load(dir.path(), DEFAULT_IGNORE_FILE).unwrap();
        assert!(patterns.is_empty());
    }

    #[test]
    fn comments_only_returns_empty() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".forceignore"), "# sfdx defaults\n\n").unwrap();
        let patterns = IgnorePatterns::load(dir.path(), DEFAULT_IGNORE_FILE).unwrap();
        assert!(patterns.is_empty());
    }

    #[test]
    fn directory_pattern_matches_recursively() {
        let patterns = patterns("profiles/");
        assert!(patterns.is_ignored(Path::new("profiles/Admin.profile-meta.xml")));
        assert!(!patterns.is_ignored(Path::new("classes/Foo.cls")));
    }

    #[test]
    fn glob_pattern_matches_any_depth() {
        let patterns = patterns("**/jsconfig.json\n*.dup");
        assert!(patterns.is_ignored(Path::new("lwc/jsconfig.json")));
        assert!(patterns.is_ignored(Path::new("classes/Foo.cls.dup")));
        assert!(!patterns.is_ignored(Path::new("lwc/card/card.js")));
    }

    #[test]
    fn negation_re_includes_file() {
        let patterns = patterns("classes/*\n!classes/Keep.cls");
        assert!(patterns.is_ignored(Path::new("classes/Drop.cls")));
        assert!(!patterns.is_ignored(Path::new("classes/Keep.cls")));
    }

    #[test]
    fn file_too_large_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".forceignore"), "x\n".repeat(40000)).unwrap();
        let result = IgnorePatterns::load(dir.path(), DEFAULT_IGNORE_FILE);
        assert!(matches!(result, Err(IgnoreError::FileTooLarge { .. })));
    }

    #[test]
    fn too_many_patterns_error() {
        let content: String = (0..1100).map(|i| format!("file{}.cls\n", i)).collect();
        let result = IgnorePatterns::from_content(
            Path::new("/project"),
            Path::new("/project/.forceignore"),
            &content,
        );
        assert!(matches!(result, Err(IgnoreError::TooManyPatterns { .. })));
    }
}
