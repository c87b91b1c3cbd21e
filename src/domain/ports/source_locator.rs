//! Source Locator Port
//!
//! Finds the on-disk source backing an artifact. The domain decides *where*
//! an artifact would live (a `SourceQuery`); implementations decide which
//! roots to search.

use std::path::PathBuf;

/// Expected location of an artifact's source, relative to a source root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceQuery {
    /// `<dir>/<member>.*`
    Flat { directory: String, member: String },
    /// `<dir>/<folder>/<member>.*`
    InFolder {
        directory: String,
        folder: String,
        member: String,
    },
    /// `<dir>/<member>/` or `<dir>/<member>.*`
    Bundle { directory: String, member: String },
    /// `objects/<parent>/<child_directory>/<child>.*`
    Nested {
        parent: String,
        child_directory: String,
        child: String,
    },
}

pub trait SourceLocator: Send + Sync {
    /// Path of the first matching file or bundle directory, if any
    fn locate(&self, query: &SourceQuery) -> Option<PathBuf>;
}
