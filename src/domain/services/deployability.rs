//! Deployability classification
//!
//! A discovered dependency is deployable if and only if its source can be
//! found locally, using the folder conventions of the path resolver in
//! reverse (type → directory). The target environment is never consulted, so
//! a dependency that already exists there but not locally is still reported
//! as non-deployable.

use crate::domain::entities::{ArtifactTypeCatalog, Classification, DependencyCandidate, RemediationHint};
use crate::domain::ports::{SourceLocator, SourceQuery};
use crate::domain::services::path_resolver::{is_bundle_type, is_folder_type};
use crate::domain::value_objects::ArtifactRef;

/// Manual remediation guidance per type
const REMEDIATION: &[(&str, &str, &str)] = &[
    (
        "CustomApplication",
        "Setup > Apps > App Manager: create or activate the app and assign it to the required profiles",
        "Salesforce Help: Create and Manage Lightning Apps",
    ),
    (
        "UserPermission",
        "Setup > Users > Profiles or Permission Sets: enable the permission (it may require a feature license)",
        "Salesforce Help: User Permissions and Access",
    ),
    (
        "Profile",
        "Setup > Users > Profiles: create the profile in the target environment",
        "Salesforce Help: Profiles",
    ),
    (
        "PermissionSet",
        "Setup > Users > Permission Sets: create the permission set in the target environment",
        "Salesforce Help: Permission Sets",
    ),
    (
        "CustomObject",
        "Setup > Object Manager: create the object in the target environment",
        "Salesforce Help: Create a Custom Object",
    ),
    (
        "CustomField",
        "Setup > Object Manager > <Object> > Fields & Relationships: create the field",
        "Salesforce Help: Create Custom Fields",
    ),
    (
        "RecordType",
        "Setup > Object Manager > <Object> > Record Types: create and activate the record type",
        "Salesforce Help: Create Record Types",
    ),
    (
        "Layout",
        "Setup > Object Manager > <Object> > Page Layouts: create the layout and assign it",
        "Salesforce Help: Page Layouts",
    ),
];

pub fn remediation_for(type_name: &str) -> Option<RemediationHint> {
    REMEDIATION
        .iter()
        .find(|(t, _, _)| *t == type_name)
        .map(|(_, location, documentation)| RemediationHint {
            location: location.to_string(),
            documentation: documentation.to_string(),
        })
}

/// Where the source of `artifact` is expected to live, if its type has a
/// known on-disk convention.
pub fn expected_source(catalog: &ArtifactTypeCatalog, artifact: &ArtifactRef) -> Option<SourceQuery> {
    let directory = catalog.directory_for(artifact.type_name())?.to_string();
    let member = artifact.member().to_string();
    let type_name = artifact.type_name();

    if catalog.is_child_type(type_name) {
        let (parent, child) = artifact.parent().zip(artifact.child())?;
        return Some(SourceQuery::Nested {
            parent: parent.to_string(),
            child_directory: directory,
            child: child.to_string(),
        });
    }
    if is_bundle_type(type_name) {
        return Some(SourceQuery::Bundle { directory, member });
    }
    if is_folder_type(type_name) {
        if let Some((folder, name)) = member.split_once('/') {
            return Some(SourceQuery::InFolder {
                directory,
                folder: folder.to_string(),
                member: name.to_string(),
            });
        }
    }
    Some(SourceQuery::Flat { directory, member })
}

pub struct DeployabilityClassifier<'a, L: SourceLocator + ?Sized> {
    catalog: &'a ArtifactTypeCatalog,
    locator: &'a L,
}

impl<'a, L: SourceLocator + ?Sized> DeployabilityClassifier<'a, L> {
    pub fn new(catalog: &'a ArtifactTypeCatalog, locator: &'a L) -> Self {
        Self { catalog, locator }
    }

    pub fn classify(&self, artifact: ArtifactRef, diagnostic: &str) -> DependencyCandidate {
        let remediation = remediation_for(artifact.type_name());

        let Some(query) = expected_source(self.catalog, &artifact) else {
            let reason = if self.catalog.is_child_type(artifact.type_name()) {
                format!(
                    "'{}' is not qualified as Parent.Child; requires manual review",
                    artifact.member()
                )
            } else {
                format!(
                    "no known source-file convention for type {}; requires manual review",
                    artifact.type_name()
                )
            };
            return non_deployable(artifact, diagnostic, reason, remediation);
        };

        match self.locator.locate(&query) {
            Some(path) => DependencyCandidate {
                reason: format!("source found at {}", path.display()),
                artifact,
                diagnostic: diagnostic.to_string(),
                classification: Classification::Deployable,
                remediation: None,
                source_path: Some(path),
            },
            None => {
                let reason = missing_source_reason(&artifact);
                non_deployable(artifact, diagnostic, reason, remediation)
            }
        }
    }
}

fn missing_source_reason(artifact: &ArtifactRef) -> String {
    match artifact.type_name() {
        "CustomApplication" => format!(
            "application '{}' is not in the source tree; it must be activated manually in the target environment",
            artifact.member()
        ),
        type_name => format!(
            "no source file for {} '{}' in the project",
            type_name,
            artifact.member()
        ),
    }
}

fn non_deployable(
    artifact: ArtifactRef,
    diagnostic: &str,
    reason: String,
    remediation: Option<RemediationHint>,
) -> DependencyCandidate {
    DependencyCandidate {
        artifact,
        diagnostic: diagnostic.to_string(),
        classification: Classification::NonDeployable,
        reason,
        remediation,
        source_path: None,
    }
}
