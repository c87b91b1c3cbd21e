//! Artifact Type Catalog Entity
//!
//! Maps on-disk directory names to canonical artifact type names
//! (`classes` → `ApexClass`). Top-level directories and the child directories
//! nested under an object folder (`fields`, `recordTypes`, ...) are kept apart
//! because they are looked up at different path depths.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

/// Top-level directories known without asking the target environment.
const BUILTIN_TYPES: &[(&str, &str)] = &[
    ("applications", "CustomApplication"),
    ("aura", "AuraDefinitionBundle"),
    ("classes", "ApexClass"),
    ("components", "ApexComponent"),
    ("contentassets", "ContentAsset"),
    ("customMetadata", "CustomMetadata"),
    ("customPermissions", "CustomPermission"),
    ("dashboards", "Dashboard"),
    ("documents", "Document"),
    ("email", "EmailTemplate"),
    ("experiences", "ExperienceBundle"),
    ("flexipages", "FlexiPage"),
    ("flows", "Flow"),
    ("globalValueSets", "GlobalValueSet"),
    ("groups", "Group"),
    ("labels", "CustomLabels"),
    ("layouts", "Layout"),
    ("lwc", "LightningComponentBundle"),
    ("namedCredentials", "NamedCredential"),
    ("objects", "CustomObject"),
    ("pages", "ApexPage"),
    ("permissionsetgroups", "PermissionSetGroup"),
    ("permissionsets", "PermissionSet"),
    ("profiles", "Profile"),
    ("queues", "Queue"),
    ("quickActions", "QuickAction"),
    ("remoteSiteSettings", "RemoteSiteSetting"),
    ("reports", "Report"),
    ("roles", "Role"),
    ("settings", "Settings"),
    ("sites", "CustomSite"),
    ("standardValueSets", "StandardValueSet"),
    ("staticresources", "StaticResource"),
    ("tabs", "CustomTab"),
    ("triggers", "ApexTrigger"),
    ("waveTemplates", "WaveTemplateBundle"),
    ("workflows", "Workflow"),
];

/// Child directories found under `objects/<Object>/`.
const BUILTIN_CHILD_TYPES: &[(&str, &str)] = &[
    ("businessProcesses", "BusinessProcess"),
    ("compactLayouts", "CompactLayout"),
    ("fieldSets", "FieldSet"),
    ("fields", "CustomField"),
    ("indexes", "Index"),
    ("listViews", "ListView"),
    ("recordTypes", "RecordType"),
    ("sharingReasons", "SharingReason"),
    ("validationRules", "ValidationRule"),
    ("webLinks", "WebLink"),
];

/// Default maximum catalog age before it is considered stale
pub const DEFAULT_MAX_AGE_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactTypeCatalog {
    types: BTreeMap<String, String>,
    children: BTreeMap<String, String>,
    refreshed_at: Option<DateTime<Utc>>,
}

impl ArtifactTypeCatalog {
    /// Catalog assembled from explicit pairs. Child directories always come
    /// from the built-in table; the introspection query does not report them.
    pub fn from_pairs<I, D, T>(pairs: I, refreshed_at: Option<DateTime<Utc>>) -> Self
    where
        I: IntoIterator<Item = (D, T)>,
        D: Into<String>,
        T: Into<String>,
    {
        Self {
            types: pairs
                .into_iter()
                .map(|(d, t)| (d.into(), t.into()))
                .collect(),
            children: builtin_children(),
            refreshed_at,
        }
    }

    /// The offline default catalog (never refreshed, therefore always stale)
    pub fn builtin() -> Self {
        Self::from_pairs(BUILTIN_TYPES.iter().copied(), None)
    }

    /// Type for a top-level directory
    pub fn lookup(&self, directory: &str) -> Option<&str> {
        self.types.get(directory).map(String::as_str)
    }

    /// Type for a directory nested under an object folder
    pub fn lookup_child(&self, directory: &str) -> Option<&str> {
        self.children
            .get(directory)
            .or_else(|| self.types.get(directory))
            .map(String::as_str)
    }

    /// Reverse lookup: the directory holding artifacts of `type_name`
    pub fn directory_for(&self, type_name: &str) -> Option<&str> {
        self.types
            .iter()
            .chain(self.children.iter())
            .find(|(_, t)| t.as_str() == type_name)
            .map(|(d, _)| d.as_str())
    }

    /// Whether `type_name` lives under an object folder
    pub fn is_child_type(&self, type_name: &str) -> bool {
        self.children.values().any(|t| t == type_name)
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    pub fn is_stale(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        match self.refreshed_at {
            Some(at) => now.signed_duration_since(at) > max_age,
            None => true,
        }
    }

    /// Top-level `(directory, type)` pairs, sorted by directory
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.types.iter().map(|(d, t)| (d.as_str(), t.as_str()))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for ArtifactTypeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_children() -> BTreeMap<String, String> {
    BUILTIN_CHILD_TYPES
        .iter()
        .map(|(d, t)| (d.to_string(), t.to_string()))
        .collect()
}
