//! Domain Services
//!
//! Pure business logic: path resolution, manifest generation, diagnostic
//! parsing and deployability classification. No I/O beyond the ports.

pub mod deployability;
pub mod diagnostics;
pub mod manifest;
pub mod path_resolver;

pub use deployability::{expected_source, remediation_for, DeployabilityClassifier};
pub use diagnostics::{DiagnosticMatch, DiagnosticRule, DiagnosticRules, ParsedDiagnostics};
pub use manifest::{generate, parse, PackageDescriptor, ParsedManifest, DESTRUCTIVE_FILE, PACKAGE_FILE};
pub use path_resolver::{normalize_relative, PathResolver, Resolution};
