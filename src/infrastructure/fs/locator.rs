//! Filesystem Source Locator
//!
//! Searches a project for an artifact's source. Roots are tried in order:
//! the project root, `<root>/unpackaged`, then every `<root>/<pkg>/main/default`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::ports::{SourceLocator, SourceQuery};
use crate::domain::services::path_resolver::{base_name, CONTAINER_SEGMENT, NESTED_PARENT_SEGMENT};

#[derive(Debug, Clone)]
pub struct FsSourceLocator {
    roots: Vec<PathBuf>,
}

impl FsSourceLocator {
    pub fn new(project_root: &Path) -> Self {
        let mut roots = vec![project_root.to_path_buf()];

        let container = project_root.join(CONTAINER_SEGMENT);
        if container.is_dir() {
            roots.push(container);
        }

        if let Ok(entries) = fs::read_dir(project_root) {
            let mut packages: Vec<PathBuf> = entries
                .filter_map(Result::ok)
                .map(|e| e.path().join("main").join("default"))
                .filter(|p| p.is_dir())
                .collect();
            packages.sort();
            roots.extend(packages);
        }

        Self { roots }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

/// First file in `dir` whose base name equals `member`
fn find_by_base_name(dir: &Path, member: &str) -> Option<PathBuf> {
    let mut matches: Vec<PathBuf> = fs::read_dir(dir)
        .ok()?
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
        .filter(|e| base_name(&e.file_name().to_string_lossy()) == member)
        .map(|e| e.path())
        .collect();
    matches.sort();
    matches.into_iter().next()
}

fn locate_in(root: &Path, query: &SourceQuery) -> Option<PathBuf> {
    match query {
        SourceQuery::Flat { directory, member } => find_by_base_name(&root.join(directory), member),
        SourceQuery::InFolder {
            directory,
            folder,
            member,
        } => find_by_base_name(&root.join(directory).join(folder), member),
        SourceQuery::Bundle { directory, member } => {
            let bundle = root.join(directory).join(member);
            if bundle.is_dir() {
                Some(bundle)
            } else {
                find_by_base_name(&root.join(directory), member)
            }
        }
        SourceQuery::Nested {
            parent,
            child_directory,
            child,
        } => find_by_base_name(
            &root
                .join(NESTED_PARENT_SEGMENT)
                .join(parent)
                .join(child_directory),
            child,
        ),
    }
}

impl SourceLocator for FsSourceLocator {
    fn locate(&self, query: &SourceQuery) -> Option<PathBuf> {
        self.roots.iter().find_map(|root| locate_in(root, query))
    }
}
