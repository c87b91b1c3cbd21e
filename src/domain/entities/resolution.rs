//! Dependency-resolution entities
//!
//! Candidates discovered from validation diagnostics, the per-iteration
//! history, and the validation outcomes recorded in it.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::entities::ArtifactSet;
use crate::domain::value_objects::ArtifactRef;

/// Whether a discovered dependency can be added to the next manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Deployable,
    NonDeployable,
}

/// Where to fix a non-deployable dependency by hand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemediationHint {
    /// Suggested configuration location in the target environment
    pub location: String,
    /// Documentation reference
    pub documentation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyCandidate {
    pub artifact: ArtifactRef,
    pub diagnostic: String,
    pub classification: Classification,
    pub reason: String,
    pub remediation: Option<RemediationHint>,
    /// Source file or bundle directory backing a deployable candidate
    pub source_path: Option<PathBuf>,
}

impl DependencyCandidate {
    pub fn is_deployable(&self) -> bool {
        self.classification == Classification::Deployable
    }
}

/// Counters reported by a validation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub components_deployed: u64,
    pub components_total: u64,
    pub tests_completed: u64,
    pub test_errors: u64,
}

/// What the validation collaborator answered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValidationOutcome {
    Succeeded {
        summary: ValidationSummary,
    },
    Failed {
        status_code: i32,
        diagnostics: Vec<String>,
        summary: ValidationSummary,
    },
    /// Interrupted by the operator before an answer arrived
    Cancelled,
}

impl ValidationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    pub fn diagnostics(&self) -> &[String] {
        match self {
            Self::Failed { diagnostics, .. } => diagnostics,
            _ => &[],
        }
    }
}

/// One pass through the resolution loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterationRecord {
    pub iteration: u32,
    pub artifacts: ArtifactSet,
    pub descriptor_path: PathBuf,
    pub outcome: ValidationOutcome,
    pub candidates: Vec<DependencyCandidate>,
    /// Diagnostics no rule matched, kept verbatim
    pub unmatched_diagnostics: Vec<String>,
}

impl IterationRecord {
    pub fn deployable(&self) -> impl Iterator<Item = &DependencyCandidate> {
        self.candidates.iter().filter(|c| c.is_deployable())
    }

    pub fn non_deployable(&self) -> impl Iterator<Item = &DependencyCandidate> {
        self.candidates.iter().filter(|c| !c.is_deployable())
    }
}
