//! Custom assertion macros for CLI and scenario tests.
//!
//! These macros provide descriptive failure messages to aid debugging.

use std::path::Path;

/// List all files in a directory recursively (for debugging)
pub fn list_all_files(dir: &Path) -> Vec<String> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(list_all_files(&path));
            } else {
                files.push(path.display().to_string());
            }
        }
    }
    files.sort();
    files
}

/// Assert that a file was copied into the output package.
///
/// # Example
/// ```ignore
/// assert_packaged!(env, "classes/Foo.cls");
/// ```
#[macro_export]
macro_rules! assert_packaged {
    ($env:expr, $path:expr) => {
        let full_path = $env.out().join($path);
        assert!(
            full_path.exists(),
            "Expected '{}' in the package, but it doesn't exist.\nFiles found:\n  {}",
            $path,
            $crate::common::list_all_files(&$env.out()).join("\n  ")
        );
    };
}

/// Assert that a file was NOT copied into the output package.
#[macro_export]
macro_rules! assert_not_packaged {
    ($env:expr, $path:expr) => {
        let full_path = $env.out().join($path);
        assert!(
            !full_path.exists(),
            "Expected '{}' to be left out of the package, but it exists.",
            $path
        );
    };
}

/// Assert that command output contains a substring.
#[macro_export]
macro_rules! assert_output_contains {
    ($result:expr, $needle:expr) => {
        let output = $result.combined_output();
        assert!(
            output.contains($needle),
            "Expected output to contain '{}', got:\n{}",
            $needle,
            output
        );
    };
}
