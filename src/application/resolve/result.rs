//! Resolve Result

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::domain::entities::{ArtifactSet, IterationRecord};
use crate::domain::value_objects::EnvironmentHandle;

/// Why the loop gave up without a successful validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustionReason {
    /// New deployable dependencies were found on the last allowed iteration
    IterationBoundExceeded,
    /// Validation failed but named nothing that could be added from source
    NoDeployableDependenciesFound,
}

impl fmt::Display for ExhaustionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IterationBoundExceeded => write!(f, "iteration bound exceeded"),
            Self::NoDeployableDependenciesFound => write!(f, "no deployable dependencies found"),
        }
    }
}

/// Terminal state of a resolution run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum ResolveOutcome {
    Succeeded,
    Exhausted(ExhaustionReason),
    UserCancelled,
}

impl ResolveOutcome {
    /// Stable identifier used in events and the report
    pub fn label(&self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::Exhausted(_) => "exhausted",
            Self::UserCancelled => "user_cancelled",
        }
    }
}

impl fmt::Display for ResolveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded => write!(f, "succeeded"),
            Self::Exhausted(reason) => write!(f, "exhausted ({})", reason),
            Self::UserCancelled => write!(f, "cancelled by user"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolveReport {
    pub outcome: ResolveOutcome,
    pub iterations: Vec<IterationRecord>,
    /// Artifacts of the last validated descriptor
    pub final_artifacts: ArtifactSet,
    pub final_descriptor: PathBuf,
    pub report_path: PathBuf,
    /// Written on exhaustion only
    pub manual_instructions: Option<PathBuf>,
}

impl ResolveReport {
    pub fn validations(&self) -> usize {
        self.iterations.len()
    }

    pub fn needs_manual_steps(&self) -> bool {
        matches!(self.outcome, ResolveOutcome::Exhausted(_))
    }
}

/// On-disk shape of `resolution-report.json`
#[derive(Debug, Serialize)]
pub(crate) struct ReportDocument<'a> {
    pub outcome: ResolveOutcome,
    pub target: &'a EnvironmentHandle,
    pub max_iterations: u32,
    pub final_descriptor: &'a PathBuf,
    pub manual_instructions: Option<&'a PathBuf>,
    pub iterations: &'a [IterationRecord],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_serializes_with_reason() {
        let json = serde_json::to_value(ResolveOutcome::Exhausted(
            ExhaustionReason::NoDeployableDependenciesFound,
        ))
        .unwrap();
        assert_eq!(json["status"], "exhausted");
        assert_eq!(json["reason"], "no_deployable_dependencies_found");

        let json = serde_json::to_value(ResolveOutcome::Succeeded).unwrap();
        assert_eq!(json["status"], "succeeded");
    }

    #[test]
    fn outcome_display_is_human_readable() {
        assert_eq!(
            ResolveOutcome::Exhausted(ExhaustionReason::IterationBoundExceeded).to_string(),
            "exhausted (iteration bound exceeded)"
        );
        assert_eq!(ResolveOutcome::UserCancelled.label(), "user_cancelled");
    }
}
