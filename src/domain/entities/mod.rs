//! Domain Entities
//!
//! Core domain objects of the delta and resolution engine.

mod artifact_set;
mod catalog;
mod delta;
mod resolution;

pub use artifact_set::ArtifactSet;
pub use catalog::{ArtifactTypeCatalog, DEFAULT_MAX_AGE_DAYS};
pub use delta::{Delta, FileRecord, SkippedFile};
pub use resolution::{
    Classification, DependencyCandidate, IterationRecord, RemediationHint, ValidationOutcome,
    ValidationSummary,
};
