//! Test environment for running the metadelta binary in isolation.
//!
//! Every `TestEnv` owns a temp directory laid out as:
//! - `source/` and `target/`: retrieved trees to compare
//! - `out/`: package output
//! - `home/`: HOME, config and cache directories
//! - `bin/`: fake `sf` scripts

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Result of running a metadelta CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parsed NDJSON lines of stdout
    pub fn events(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| l.trim_start().starts_with('{'))
            .map(|l| serde_json::from_str(l).expect("stdout line is JSON"))
            .collect()
    }
}

pub struct TestEnv {
    pub root: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        for dir in ["source", "target", "home", "bin"] {
            std::fs::create_dir_all(root.path().join(dir)).expect("Failed to create dir");
        }
        Self {
            root,
            bin: PathBuf::from(env!("CARGO_BIN_EXE_metadelta")),
        }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn source(&self) -> PathBuf {
        self.path("source")
    }

    pub fn target(&self) -> PathBuf {
        self.path("target")
    }

    pub fn out(&self) -> PathBuf {
        self.path("out")
    }

    pub fn write(&self, relative: &str, content: &str) {
        let full_path = self.path(relative);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
    }

    /// Write a file into both trees
    pub fn write_both(&self, relative: &str, content: &str) {
        self.write(&format!("source/{}", relative), content);
        self.write(&format!("target/{}", relative), content);
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    /// Project config in the working directory, pointing the catalog cache into the env
    pub fn write_config(&self, extra: &str) {
        let cache = self.path("home/cache");
        let content = format!(
            "[catalog]\ncache_dir = \"{}\"\n\n{}",
            cache.display().to_string().replace('\\', "/"),
            extra
        );
        self.write("metadelta.toml", &content);
    }

    /// Install an executable fake `sf` and configure it as the validator binary
    #[cfg(unix)]
    pub fn install_fake_sf(&self, script: &str) {
        use std::os::unix::fs::PermissionsExt;

        let path = self.path("bin/sf");
        std::fs::write(&path, script).expect("Failed to write fake sf");
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();

        self.write_config(&format!("[validator]\nsf_bin = \"{}\"\n", path.display()));
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_from(self.root.path(), args)
    }

    pub fn run_from(&self, cwd: &Path, args: &[&str]) -> TestResult {
        let home = self.path("home");
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(cwd)
            .args(args)
            .env("HOME", &home)
            .env("XDG_CONFIG_HOME", home.join("config"))
            .env("XDG_CACHE_HOME", home.join("cache"))
            .env_remove("RUST_LOG");
        for key in [
            "METADELTA_API_VERSION",
            "METADELTA_MAX_ITERATIONS",
            "METADELTA_TIMEOUT_MINUTES",
            "METADELTA_SF_BIN",
            "METADELTA_CATALOG_MAX_AGE_DAYS",
        ] {
            cmd.env_remove(key);
        }

        let output = cmd.output().expect("Failed to execute metadelta");
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
