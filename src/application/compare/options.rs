//! Compare Options

use std::path::PathBuf;

use crate::domain::value_objects::DEFAULT_IGNORE_FILE;

/// Options for the compare use case
#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// Retrieved tree of the source environment
    pub source: PathBuf,
    /// Retrieved tree of the target environment
    pub target: PathBuf,
    /// Package directory to populate; `None` computes the delta only
    pub output: Option<PathBuf>,
    pub api_version: String,
    /// Ignore file looked up at the source root, applied to both trees
    pub ignore_file: String,
}

impl CompareOptions {
    pub fn new(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            output: None,
            api_version: "60.0".to_string(),
            ignore_file: DEFAULT_IGNORE_FILE.to_string(),
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_ignore_file(mut self, ignore_file: impl Into<String>) -> Self {
        self.ignore_file = ignore_file.into();
        self
    }
}
