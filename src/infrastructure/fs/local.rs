//! Local File System Operations
//!
//! Tree walking, atomic writes and package copying for the comparator and
//! the resolution loop.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tempfile::NamedTempFile;

use crate::domain::entities::FileRecord;
use crate::domain::services::path_resolver::normalize_relative;
use crate::domain::value_objects::IgnorePatterns;
use crate::error::DeltaResult;

/// Write `content` to `path` via a temp file in the same directory and a
/// rename, creating parent directories as needed.
pub fn write_atomic(path: &Path, content: &[u8]) -> DeltaResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;

    let mut tmp = NamedTempFile::new_in(&parent)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Result of walking one artifact tree
#[derive(Debug, Default)]
pub struct TreeListing {
    pub files: Vec<FileRecord>,
    /// Entries the walker could not read
    pub errors: Vec<(PathBuf, String)>,
}

/// Every regular file under `root`, with normalized relative paths.
///
/// Dotfiles and directories are skipped, as is anything whose normalized
/// path is matched by `ignore`.
/// Walk errors are collected rather than aborting the walk.
pub fn walk_tree(root: &Path, ignore: &IgnorePatterns) -> TreeListing {
    let mut listing = TreeListing::default();

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .hidden(true)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = error_path(&e).unwrap_or(root).to_path_buf();
                listing.errors.push((path, e.to_string()));
                continue;
            }
        };
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        let relative = normalize_relative(&rel.to_string_lossy());
        if ignore.is_ignored(Path::new(&relative)) {
            continue;
        }

        listing
            .files
            .push(FileRecord::new(entry.path().to_path_buf(), relative));
    }

    listing
}

/// The entry a walk error is about, looking through depth and line wrappers
fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path),
        ignore::Error::Loop { child, .. } => Some(child),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        _ => None,
    }
}

/// Copy a single file, creating parent directories.
pub fn copy_file(from: &Path, to: &Path) -> std::io::Result<u64> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(from, to)
}

/// Copy a directory recursively. Returns the number of files copied.
pub fn copy_dir(from: &Path, to: &Path) -> std::io::Result<usize> {
    let mut copied = 0;
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copied += copy_dir(&entry.path(), &target)?;
        } else {
            copy_file(&entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}
