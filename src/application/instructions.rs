//! Manual-Instructions Emitter
//!
//! Renders the non-deployable dependencies of a resolution run as a
//! Markdown checklist for the operator.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::domain::entities::{DependencyCandidate, IterationRecord};
use crate::domain::value_objects::{ArtifactRef, EnvironmentHandle};
use crate::error::DeltaResult;
use crate::infrastructure::fs::write_atomic;

/// Everything the document needs; time is injected so rendering stays pure
#[derive(Debug, Clone)]
pub struct ManualInstructions {
    pub generated_at: DateTime<Utc>,
    pub target: EnvironmentHandle,
    /// Human-readable terminal outcome
    pub outcome: String,
    pub candidates: Vec<DependencyCandidate>,
}

impl ManualInstructions {
    /// Collect every non-deployable candidate ever recorded, first occurrence wins
    pub fn from_iterations(
        generated_at: DateTime<Utc>,
        target: EnvironmentHandle,
        outcome: impl Into<String>,
        iterations: &[IterationRecord],
    ) -> Self {
        let mut seen: BTreeSet<&ArtifactRef> = BTreeSet::new();
        let candidates = iterations
            .iter()
            .flat_map(IterationRecord::non_deployable)
            .filter(|c| seen.insert(&c.artifact))
            .cloned()
            .collect();

        Self {
            generated_at,
            target,
            outcome: outcome.into(),
            candidates,
        }
    }
}

pub fn render_manual_instructions(instructions: &ManualInstructions) -> String {
    let mut out = String::new();
    out.push_str("# Manual steps required\n\n");
    let _ = writeln!(
        out,
        "Generated: {}",
        instructions.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(out, "Target environment: {}", instructions.target);
    let _ = writeln!(out, "Outcome: {}", instructions.outcome);
    out.push('\n');

    if instructions.candidates.is_empty() {
        out.push_str("No non-deployable dependencies were recorded. ");
        out.push_str("Review the unmatched diagnostics in resolution-report.json.\n");
        return out;
    }

    out.push_str(
        "These dependencies cannot be deployed from source. \
         Configure them in the target environment, then run the promotion again.\n",
    );

    let mut by_type: BTreeMap<&str, Vec<&DependencyCandidate>> = BTreeMap::new();
    for candidate in &instructions.candidates {
        by_type
            .entry(candidate.artifact.type_name())
            .or_default()
            .push(candidate);
    }

    for (type_name, mut candidates) in by_type {
        candidates.sort_by(|a, b| a.artifact.member().cmp(b.artifact.member()));
        let _ = write!(out, "\n## {}\n", type_name);
        for candidate in candidates {
            let _ = write!(out, "\n- [ ] **{}**\n", candidate.artifact.member());
            let _ = writeln!(out, "  - Diagnostic: {}", candidate.diagnostic);
            let _ = writeln!(out, "  - Reason: {}", candidate.reason);
            if let Some(hint) = &candidate.remediation {
                let _ = writeln!(out, "  - Where: {}", hint.location);
                let _ = writeln!(out, "  - Reference: {}", hint.documentation);
            }
        }
    }

    out
}

/// Render and write (overwriting) the document.
pub fn write_manual_instructions(path: &Path, instructions: &ManualInstructions) -> DeltaResult<()> {
    write_atomic(path, render_manual_instructions(instructions).as_bytes())
}
