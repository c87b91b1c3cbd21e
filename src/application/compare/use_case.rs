//! Compare Use Case
//!
//! Computes the delta between a source and a target tree:
//! 1. Walk both trees (concurrently)
//! 2. Additive pass: source files missing from target or with different content
//! 3. Destructive pass: target files missing from source
//! 4. Copy changed artifacts into the output package and write descriptors
//!
//! Both passes run on the rayon pool; their results are folded into the
//! `Delta` by a single writer.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::domain::entities::{ArtifactTypeCatalog, Delta, FileRecord, SkippedFile};
use crate::domain::services::manifest::{generate, DESTRUCTIVE_FILE, PACKAGE_FILE};
use crate::domain::services::path_resolver::{is_bundle_type, normalized_segments};
use crate::domain::services::{PathResolver, Resolution};
use crate::domain::value_objects::{ContentHash, IgnorePatterns};
use crate::error::{DeltaError, DeltaResult};
use crate::infrastructure::fs::{copy_dir, copy_file, walk_tree, write_atomic, TreeListing};

use super::options::CompareOptions;

/// Companion descriptor suffix (`Foo.cls` → `Foo.cls-meta.xml`)
const META_SUFFIX: &str = "-meta.xml";

/// Per-file result of a pass
enum FileOutcome<'a> {
    Unchanged,
    Changed(&'a FileRecord, Resolution),
    Skipped(SkippedFile),
}

/// A file or bundle directory to place in the output package
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum CopyItem {
    Dir { from: PathBuf, relative: String },
    File { from: PathBuf, relative: String },
}

pub struct CompareUseCase<'a> {
    catalog: &'a ArtifactTypeCatalog,
}

impl<'a> CompareUseCase<'a> {
    pub fn new(catalog: &'a ArtifactTypeCatalog) -> Self {
        Self { catalog }
    }

    pub fn execute(&self, options: &CompareOptions) -> DeltaResult<Delta> {
        for root in [&options.source, &options.target] {
            if !root.is_dir() {
                return Err(DeltaError::DirectoryNotFound { path: root.clone() });
            }
        }

        let ignore = IgnorePatterns::load(&options.source, &options.ignore_file)?;
        if !ignore.is_empty() {
            debug!(patterns = ignore.pattern_count(), file = %options.ignore_file, "ignore patterns loaded");
        }

        let (source, target) = rayon::join(
            || walk_tree(&options.source, &ignore),
            || walk_tree(&options.target, &ignore),
        );
        info!(
            source_files = source.files.len(),
            target_files = target.files.len(),
            "trees scanned"
        );

        let mut delta = Delta {
            source_files: source.files.len(),
            target_files: target.files.len(),
            ..Delta::default()
        };
        record_walk_errors(&mut delta, &source);
        record_walk_errors(&mut delta, &target);

        let resolver = PathResolver::new(self.catalog);
        let (additive, destructive) = rayon::join(
            || additive_pass(&resolver, &source.files, &target.files),
            || destructive_pass(&resolver, &source.files, &target.files),
        );

        let mut copies = BTreeSet::new();
        for outcome in additive {
            if let Some((record, artifact_type)) = self.fold(&mut delta, outcome, true) {
                plan_copies(&mut copies, record, artifact_type.as_deref());
            }
        }
        for outcome in destructive {
            self.fold(&mut delta, outcome, false);
        }

        info!(
            additive = delta.additive.len(),
            destructive = delta.destructive.len(),
            unrecognized = delta.unrecognized_folders.len(),
            "delta computed"
        );

        if let Some(output) = &options.output {
            delta.copied_files = copy_package(output, copies, &mut delta.skipped);
            write_package(output, &delta, &options.api_version)?;
        }

        Ok(delta)
    }

    /// Merge one pass result into the delta. Returns changed files that
    /// resolved to an artifact, with their type.
    fn fold<'r>(
        &self,
        delta: &mut Delta,
        outcome: FileOutcome<'r>,
        additive: bool,
    ) -> Option<(&'r FileRecord, Option<String>)> {
        match outcome {
            FileOutcome::Unchanged => None,
            FileOutcome::Skipped(skipped) => {
                warn!(path = %skipped.path.display(), error = %skipped.error, "skipping unreadable file");
                delta.skipped.push(skipped);
                None
            }
            FileOutcome::Changed(record, Resolution::Resolved(artifact)) => {
                debug!(path = %record.relative, artifact = %artifact, additive, "changed");
                let type_name = artifact.type_name().to_string();
                if additive {
                    delta.additive.insert(artifact);
                } else {
                    delta.destructive.insert(artifact);
                }
                Some((record, Some(type_name)))
            }
            FileOutcome::Changed(record, Resolution::Unresolved { folder }) => {
                if delta.unrecognized_folders.insert(folder.clone()) {
                    warn!(folder = %folder, "unrecognized folder; its files are not packaged");
                }
                debug!(path = %record.relative, "unresolved");
                None
            }
            FileOutcome::Changed(_, Resolution::NotAnArtifact) => None,
        }
    }
}

fn record_walk_errors(delta: &mut Delta, listing: &TreeListing) {
    for (path, error) in &listing.errors {
        warn!(path = %path.display(), error = %error, "could not read directory entry");
        delta.skipped.push(SkippedFile {
            path: path.clone(),
            error: error.clone(),
        });
    }
}

fn hash(record: &FileRecord) -> Result<ContentHash, SkippedFile> {
    ContentHash::of_file(&record.absolute).map_err(|e| SkippedFile {
        path: record.absolute.clone(),
        error: e.to_string(),
    })
}

fn index(files: &[FileRecord]) -> HashMap<&str, &FileRecord> {
    files.iter().map(|f| (f.relative.as_str(), f)).collect()
}

fn additive_pass<'r>(
    resolver: &PathResolver<'_>,
    source: &'r [FileRecord],
    target: &[FileRecord],
) -> Vec<FileOutcome<'r>> {
    let target = index(target);
    source
        .par_iter()
        .map(|record| {
            let changed = match target.get(record.relative.as_str()) {
                None => true,
                Some(counterpart) => match (hash(record), hash(counterpart)) {
                    (Ok(a), Ok(b)) => a != b,
                    (Err(skipped), _) | (_, Err(skipped)) => return FileOutcome::Skipped(skipped),
                },
            };
            if changed {
                FileOutcome::Changed(record, resolver.resolve(&record.relative))
            } else {
                FileOutcome::Unchanged
            }
        })
        .collect()
}

fn destructive_pass<'r>(
    resolver: &PathResolver<'_>,
    source: &[FileRecord],
    target: &'r [FileRecord],
) -> Vec<FileOutcome<'r>> {
    let source = index(source);
    target
        .par_iter()
        .map(|record| {
            if source.contains_key(record.relative.as_str()) {
                FileOutcome::Unchanged
            } else {
                FileOutcome::Changed(record, resolver.resolve(&record.relative))
            }
        })
        .collect()
}

/// Schedule the changed file, its companion, or its whole bundle.
fn plan_copies(copies: &mut BTreeSet<CopyItem>, record: &FileRecord, type_name: Option<&str>) {
    let segments = normalized_segments(&record.relative);

    if type_name.is_some_and(is_bundle_type) && segments.len() > 2 {
        // Walk up from the file to the bundle directory (second segment)
        let depth = segments.len() - 2;
        if let Some(dir) = record.absolute.ancestors().nth(depth) {
            copies.insert(CopyItem::Dir {
                from: dir.to_path_buf(),
                relative: segments[..2].join("/"),
            });
            return;
        }
    }

    copies.insert(CopyItem::File {
        from: record.absolute.clone(),
        relative: record.relative.clone(),
    });

    let companion = match record.relative.strip_suffix(META_SUFFIX) {
        Some(primary) => primary.to_string(),
        None => format!("{}{}", record.relative, META_SUFFIX),
    };
    let companion_name = companion.rsplit('/').next().unwrap_or(&companion);
    let companion_path = record.absolute.with_file_name(companion_name);
    if companion_path.is_file() {
        copies.insert(CopyItem::File {
            from: companion_path,
            relative: companion,
        });
    }
}

/// Perform the planned copies. Files inside a copied bundle are not copied twice.
fn copy_package(output: &Path, copies: BTreeSet<CopyItem>, skipped: &mut Vec<SkippedFile>) -> usize {
    let dirs: Vec<String> = copies
        .iter()
        .filter_map(|c| match c {
            CopyItem::Dir { relative, .. } => Some(format!("{}/", relative)),
            CopyItem::File { .. } => None,
        })
        .collect();

    let mut copied = 0;
    for item in copies {
        let result = match &item {
            CopyItem::Dir { from, relative } => copy_dir(from, &output.join(relative)),
            CopyItem::File { from, relative } => {
                if dirs.iter().any(|d| relative.starts_with(d.as_str())) {
                    continue;
                }
                copy_file(from, &output.join(relative)).map(|_| 1)
            }
        };
        match result {
            Ok(n) => copied += n,
            Err(e) => {
                let (CopyItem::Dir { from, .. } | CopyItem::File { from, .. }) = item;
                warn!(path = %from.display(), error = %e, "could not copy into package");
                skipped.push(SkippedFile {
                    path: from,
                    error: e.to_string(),
                });
            }
        }
    }
    debug!(copied, output = %output.display(), "package populated");
    copied
}

/// Write `package.xml`, and `destructiveChanges.xml` when anything is removed.
pub fn write_package(output: &Path, delta: &Delta, api_version: &str) -> DeltaResult<Vec<PathBuf>> {
    let mut written = Vec::new();

    let package = output.join(PACKAGE_FILE);
    write_atomic(&package, generate(&delta.additive, api_version).as_str().as_bytes())?;
    written.push(package);

    if !delta.destructive.is_empty() {
        let destructive = output.join(DESTRUCTIVE_FILE);
        write_atomic(
            &destructive,
            generate(&delta.destructive, api_version).as_str().as_bytes(),
        )?;
        written.push(destructive);
    }

    Ok(written)
}
