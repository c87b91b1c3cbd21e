//! Metadata Path Resolver
//!
//! Maps a path inside a retrieved artifact tree to the `(type, member)` it
//! belongs to. Pure: never touches the filesystem and never fails; unknown
//! folders degrade to `Resolution::Unresolved`.

use crate::domain::entities::ArtifactTypeCatalog;
use crate::domain::value_objects::ArtifactRef;

/// Optional wrapper directory around a retrieved tree
pub const CONTAINER_SEGMENT: &str = "unpackaged";

/// Folder whose children carry nested artifacts
pub const NESTED_PARENT_SEGMENT: &str = "objects";

/// Types addressed as a whole directory rather than per file
pub const BUNDLE_TYPES: &[&str] = &[
    "AuraDefinitionBundle",
    "ExperienceBundle",
    "LightningComponentBundle",
    "StaticResource",
    "WaveTemplateBundle",
];

/// Types whose members live inside a named folder (`Folder/Member`)
pub const FOLDER_TYPES: &[&str] = &["Dashboard", "Document", "EmailTemplate", "Report"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(ArtifactRef),
    /// The folder did not map to a known type
    Unresolved { folder: String },
    /// A file at the tree root (e.g. a manifest); not an artifact at all
    NotAnArtifact,
}

impl Resolution {
    pub fn artifact(self) -> Option<ArtifactRef> {
        match self {
            Self::Resolved(artifact) => Some(artifact),
            _ => None,
        }
    }
}

pub fn is_bundle_type(type_name: &str) -> bool {
    BUNDLE_TYPES.contains(&type_name)
}

pub fn is_folder_type(type_name: &str) -> bool {
    FOLDER_TYPES.contains(&type_name)
}

/// Split a relative path into segments and drop the optional `unpackaged`
/// wrapper and `<package>/main/default` source-root prefix.
pub fn normalized_segments(relative: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = relative
        .split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();

    if segments.first() == Some(&CONTAINER_SEGMENT) {
        segments.remove(0);
    }
    if segments.len() > 3 && segments[1] == "main" && segments[2] == "default" {
        segments.drain(..3);
    }
    segments
}

/// The normalized relative path used for source/target correspondence
pub fn normalize_relative(relative: &str) -> String {
    normalized_segments(relative).join("/")
}

/// File name with every dotted suffix removed (`Foo.cls-meta.xml` → `Foo`)
pub fn base_name(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'a> {
    catalog: &'a ArtifactTypeCatalog,
}

impl<'a> PathResolver<'a> {
    pub fn new(catalog: &'a ArtifactTypeCatalog) -> Self {
        Self { catalog }
    }

    pub fn resolve(&self, relative: &str) -> Resolution {
        let segments = normalized_segments(relative);

        let (first, rest) = match segments.split_first() {
            Some((first, rest)) if !rest.is_empty() => (*first, rest),
            _ => return Resolution::NotAnArtifact,
        };

        if first == NESTED_PARENT_SEGMENT && segments.len() >= 4 {
            return self.resolve_nested(&segments);
        }

        let Some(type_name) = self.catalog.lookup(first) else {
            return Resolution::Unresolved {
                folder: first.to_string(),
            };
        };

        let member = if rest.len() == 1 {
            base_name(rest[0]).to_string()
        } else if is_bundle_type(type_name) {
            rest[0].to_string()
        } else if is_folder_type(type_name) {
            format!("{}/{}", rest[0], base_name(rest[rest.len() - 1]))
        } else {
            base_name(rest[rest.len() - 1]).to_string()
        };

        if member.is_empty() {
            return Resolution::NotAnArtifact;
        }
        Resolution::Resolved(ArtifactRef::new(type_name, member))
    }

    fn resolve_nested(&self, segments: &[&str]) -> Resolution {
        let parent = segments[1];
        let child_dir = segments[2];
        let child = base_name(segments[segments.len() - 1]);

        match self.catalog.lookup_child(child_dir) {
            Some(type_name) if !child.is_empty() => Resolution::Resolved(ArtifactRef::new(
                type_name,
                format!("{}.{}", parent, child),
            )),
            Some(_) => Resolution::NotAnArtifact,
            None => Resolution::Unresolved {
                folder: format!("{}/{}", NESTED_PARENT_SEGMENT, child_dir),
            },
        }
    }
}
