//! Error types for metadelta
//!
//! Library code returns `DeltaResult<T>`; the binary wraps these in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::{CatalogSourceError, ValidationCallError};

/// Result type alias for metadelta operations
pub type DeltaResult<T> = Result<T, DeltaError>;

/// Main error type for metadelta operations
#[derive(Error, Debug)]
pub enum DeltaError {
    /// Catalog refresh failed; callers fall back to the cached catalog
    #[error("artifact type catalog refresh failed: {0}")]
    UpstreamQuery(#[from] CatalogSourceError),

    /// The dry-run validation collaborator could not be invoked or answered garbage
    #[error("validation call failed: {0}")]
    ValidationCall(#[from] ValidationCallError),

    /// A package descriptor could not be parsed
    #[error("malformed manifest{}: {message}", path_suffix(.path))]
    MalformedManifest {
        path: Option<PathBuf>,
        message: String,
    },

    /// Invalid configuration file
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// Directory not found
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Ignore file could not be loaded
    #[error(transparent)]
    Ignore(#[from] crate::domain::value_objects::IgnoreError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" {}", p.display()),
        None => String::new(),
    }
}

impl DeltaError {
    /// Build a `MalformedManifest` error without a file location
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedManifest {
            path: None,
            message: message.into(),
        }
    }

    /// Attach a file location to a `MalformedManifest` error
    pub fn at_path(self, file: impl Into<PathBuf>) -> Self {
        match self {
            Self::MalformedManifest { message, .. } => Self::MalformedManifest {
                path: Some(file.into()),
                message,
            },
            other => other,
        }
    }
}
