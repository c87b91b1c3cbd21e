//! Delta entities: file records and the comparison result

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::domain::entities::ArtifactSet;
use crate::domain::value_objects::ContentHash;

/// One file found while walking an artifact tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Location on disk
    pub absolute: PathBuf,
    /// Normalized `/`-separated path under the tree root
    pub relative: String,
    /// Computed lazily, at most once per pass
    pub hash: Option<ContentHash>,
}

impl FileRecord {
    pub fn new(absolute: impl Into<PathBuf>, relative: impl Into<String>) -> Self {
        Self {
            absolute: absolute.into(),
            relative: relative.into(),
            hash: None,
        }
    }
}

/// A file that could not be read or hashed and was left out of the comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: String,
}

/// Result of comparing a source tree against a target tree (the delta result).
#[derive(Debug, Clone, Default)]
pub struct Delta {
    /// New or changed artifacts present in source
    pub additive: ArtifactSet,
    /// Artifacts present in target but absent from source
    pub destructive: ArtifactSet,
    /// Folder names that did not resolve to a known type
    pub unrecognized_folders: BTreeSet<String>,
    /// Files skipped because of I/O errors
    pub skipped: Vec<SkippedFile>,
    /// Files scanned under the source tree
    pub source_files: usize,
    /// Files scanned under the target tree
    pub target_files: usize,
    /// Files copied into the output package
    pub copied_files: usize,
}

impl Delta {
    pub fn has_changes(&self) -> bool {
        !self.additive.is_empty() || !self.destructive.is_empty()
    }
}
