//! metadelta - metadata delta packaging and dependency resolution
//!
//! Promotes configuration metadata between two environments: compares two
//! retrieved artifact trees, packages the changed artifacts with a manifest,
//! then validates the manifest against the target (dry run only) and adds the
//! dependencies the validation reports, until it passes or no further
//! progress is possible.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{
    CompareOptions, CompareUseCase, ExhaustionReason, ResolveOptions, ResolveOutcome,
    ResolveReport, ResolveUseCase,
};
pub use config::Config;
pub use domain::entities::{ArtifactSet, ArtifactTypeCatalog, Delta};
pub use domain::value_objects::{ArtifactRef, CancelToken, EnvironmentHandle};
pub use error::{DeltaError, DeltaResult};
