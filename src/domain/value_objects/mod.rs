//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod artifact_ref;
mod cancel;
mod config_warning;
mod environment;
mod hash;
mod ignore_patterns;

pub use artifact_ref::ArtifactRef;
pub use cancel::CancelToken;
pub use config_warning::ConfigWarning;
pub use environment::EnvironmentHandle;
pub use hash::ContentHash;
pub use ignore_patterns::{IgnoreError, IgnorePatterns, DEFAULT_IGNORE_FILE};
