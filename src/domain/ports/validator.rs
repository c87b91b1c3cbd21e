//! Validator Port
//!
//! Dry-run validation of a package descriptor against the target
//! environment. Never applies anything.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::domain::entities::ValidationOutcome;
use crate::domain::value_objects::{CancelToken, EnvironmentHandle};

#[derive(Debug, Clone)]
pub struct ValidationRequest {
    /// Descriptor file to validate
    pub manifest: PathBuf,
    /// Project root holding the source the descriptor refers to
    pub project_root: PathBuf,
    pub target: EnvironmentHandle,
    pub timeout: Duration,
}

/// The validation call itself failed; distinct from a failed validation
#[derive(Debug, Error)]
pub enum ValidationCallError {
    #[error("failed to start validator '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("validation did not finish within {0:?}")]
    TimedOut(Duration),

    #[error("validator response could not be parsed: {message}")]
    Unparseable { message: String, raw: String },

    #[error("validator I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ValidationCallError {
    /// Raw validator output, when the call produced any
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Self::Unparseable { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

/// Trait for dry-run validation.
///
/// Implementations must poll `cancel` and return
/// `ValidationOutcome::Cancelled` once it is set.
pub trait Validator: Send + Sync {
    fn validate(
        &self,
        request: &ValidationRequest,
        cancel: &CancelToken,
    ) -> Result<ValidationOutcome, ValidationCallError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparseable_keeps_raw_response() {
        let err = ValidationCallError::Unparseable {
            message: "expected value".into(),
            raw: "<html>".into(),
        };
        assert_eq!(err.raw_response(), Some("<html>"));
        assert!(err.to_string().contains("expected value"));
    }

    #[test]
    fn timeout_message_names_duration() {
        let err = ValidationCallError::TimedOut(Duration::from_secs(5));
        assert_eq!(err.to_string(), "validation did not finish within 5s");
        assert!(err.raw_response().is_none());
    }
}
