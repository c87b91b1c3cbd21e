//! Resolve Options

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::value_objects::EnvironmentHandle;

/// Default bound on validation round-trips
pub const DEFAULT_MAX_ITERATIONS: u32 = 10;

/// Default per-validation timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(33 * 60);

/// Final descriptor written at the work directory root
pub const FINAL_DESCRIPTOR: &str = "package.xml";

/// Serialized iteration history
pub const REPORT_FILE: &str = "resolution-report.json";

#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Where the source of discovered dependencies is looked up
    pub project_root: PathBuf,
    pub target: EnvironmentHandle,
    /// Receives `iteration-<N>/package.xml`, the final descriptor and the report
    pub work_dir: PathBuf,
    pub max_iterations: u32,
    pub timeout: Duration,
    pub api_version: String,
    /// Manual-instructions document; relative paths are under `work_dir`
    pub manual_instructions: PathBuf,
}

impl ResolveOptions {
    pub fn new(
        project_root: impl Into<PathBuf>,
        target: impl Into<EnvironmentHandle>,
        work_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            project_root: project_root.into(),
            target: target.into(),
            work_dir: work_dir.into(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            timeout: DEFAULT_TIMEOUT,
            api_version: "60.0".to_string(),
            manual_instructions: PathBuf::from("MANUAL_STEPS.md"),
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_manual_instructions(mut self, path: impl Into<PathBuf>) -> Self {
        self.manual_instructions = path.into();
        self
    }

    pub fn iteration_descriptor(&self, iteration: u32) -> PathBuf {
        self.work_dir
            .join(format!("iteration-{}", iteration))
            .join(FINAL_DESCRIPTOR)
    }

    pub fn final_descriptor(&self) -> PathBuf {
        self.work_dir.join(FINAL_DESCRIPTOR)
    }

    pub fn report_path(&self) -> PathBuf {
        self.work_dir.join(REPORT_FILE)
    }

    pub fn manual_instructions_path(&self) -> PathBuf {
        resolve_under(&self.work_dir, &self.manual_instructions)
    }
}

fn resolve_under(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
