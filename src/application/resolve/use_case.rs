//! Resolve Use Case
//!
//! Bounded dependency-resolution loop:
//! 1. Validate the current descriptor (dry run) against the target
//! 2. On failure, map diagnostics to artifacts and classify them
//! 3. Extend the set with new deployable dependencies, with approval
//! 4. Stop on success, exhaustion, or cancellation
//!
//! Every iteration writes its own descriptor; earlier ones are kept.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::application::instructions::{write_manual_instructions, ManualInstructions};
use crate::domain::entities::{
    ArtifactSet, ArtifactTypeCatalog, DependencyCandidate, IterationRecord, ValidationOutcome,
};
use crate::domain::ports::{
    Approval, IterationApprover, IterationProposal, NoopEventSink, ResolveEvent, ResolveEventSink,
    SourceLocator, ValidationRequest, Validator,
};
use crate::domain::services::manifest::generate;
use crate::domain::services::{DeployabilityClassifier, DiagnosticRules};
use crate::domain::value_objects::{ArtifactRef, CancelToken};
use crate::error::DeltaResult;
use crate::infrastructure::fs::write_atomic;

use super::options::ResolveOptions;
use super::result::{ExhaustionReason, ReportDocument, ResolveOutcome, ResolveReport};

/// Loop position between validations
enum LoopState {
    Validating {
        iteration: u32,
        artifacts: ArtifactSet,
    },
    Extending {
        iteration: u32,
        artifacts: ArtifactSet,
        additions: Vec<ArtifactRef>,
    },
    Done {
        outcome: ResolveOutcome,
        artifacts: ArtifactSet,
    },
}

pub struct ResolveUseCase<'a, V: Validator + ?Sized, A: IterationApprover + ?Sized> {
    catalog: &'a ArtifactTypeCatalog,
    rules: &'a DiagnosticRules,
    locator: &'a dyn SourceLocator,
    validator: &'a V,
    approver: &'a A,
    events: Arc<dyn ResolveEventSink>,
}

impl<'a, V: Validator + ?Sized, A: IterationApprover + ?Sized> ResolveUseCase<'a, V, A> {
    pub fn new(
        catalog: &'a ArtifactTypeCatalog,
        rules: &'a DiagnosticRules,
        locator: &'a dyn SourceLocator,
        validator: &'a V,
        approver: &'a A,
    ) -> Self {
        Self {
            catalog,
            rules,
            locator,
            validator,
            approver,
            events: Arc::new(NoopEventSink),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn ResolveEventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn execute(
        &self,
        options: &ResolveOptions,
        initial: ArtifactSet,
        cancel: &CancelToken,
    ) -> DeltaResult<ResolveReport> {
        info!(
            artifacts = initial.len(),
            max_iterations = options.max_iterations,
            target = %options.target,
            "resolution started"
        );
        self.events.on_event(ResolveEvent::ResolveStarted {
            initial_artifacts: initial.len(),
            max_iterations: options.max_iterations,
            target: options.target.to_string(),
        });

        let mut iterations = Vec::new();
        let mut state = LoopState::Validating {
            iteration: 1,
            artifacts: initial,
        };

        let (outcome, artifacts) = loop {
            state = match state {
                LoopState::Validating {
                    iteration,
                    artifacts,
                } => self.validate(options, iteration, artifacts, cancel, &mut iterations)?,
                LoopState::Extending {
                    iteration,
                    artifacts,
                    additions,
                } => self.extend(options, iteration, artifacts, additions, cancel),
                LoopState::Done {
                    outcome,
                    artifacts,
                } => break (outcome, artifacts),
            };
        };

        self.finish(options, outcome, artifacts, iterations)
    }

    fn validate(
        &self,
        options: &ResolveOptions,
        iteration: u32,
        artifacts: ArtifactSet,
        cancel: &CancelToken,
        iterations: &mut Vec<IterationRecord>,
    ) -> DeltaResult<LoopState> {
        if cancel.is_cancelled() {
            return Ok(LoopState::Done {
                outcome: ResolveOutcome::UserCancelled,
                artifacts,
            });
        }

        let descriptor_path = options.iteration_descriptor(iteration);
        let descriptor = generate(&artifacts, &options.api_version);
        write_atomic(&descriptor_path, descriptor.as_str().as_bytes())?;

        info!(iteration, artifacts = artifacts.len(), "validating");
        self.events.on_event(ResolveEvent::IterationStarted {
            iteration,
            artifacts: artifacts.len(),
            descriptor: descriptor_path.clone(),
        });

        let request = ValidationRequest {
            manifest: descriptor_path.clone(),
            project_root: options.project_root.clone(),
            target: options.target.clone(),
            timeout: options.timeout,
        };
        let outcome = match self.validator.validate(&request, cancel) {
            Ok(outcome) => outcome,
            Err(e) if cancel.is_cancelled() => {
                warn!(iteration, error = %e, "validation interrupted");
                ValidationOutcome::Cancelled
            }
            Err(e) => return Err(e.into()),
        };

        self.events.on_event(ResolveEvent::IterationFinished {
            iteration,
            success: outcome.is_success(),
        });

        let (candidates, unmatched) = match &outcome {
            ValidationOutcome::Failed { diagnostics, .. } => self.classify(iteration, diagnostics),
            _ => (Vec::new(), Vec::new()),
        };
        let additions: Vec<ArtifactRef> = candidates
            .iter()
            .filter(|c| c.is_deployable() && !artifacts.contains(&c.artifact))
            .map(|c| c.artifact.clone())
            .collect();

        let next = match &outcome {
            ValidationOutcome::Succeeded { .. } => LoopState::Done {
                outcome: ResolveOutcome::Succeeded,
                artifacts: artifacts.clone(),
            },
            ValidationOutcome::Cancelled => LoopState::Done {
                outcome: ResolveOutcome::UserCancelled,
                artifacts: artifacts.clone(),
            },
            ValidationOutcome::Failed { .. } if additions.is_empty() => LoopState::Done {
                outcome: ResolveOutcome::Exhausted(ExhaustionReason::NoDeployableDependenciesFound),
                artifacts: artifacts.clone(),
            },
            ValidationOutcome::Failed { .. } if iteration >= options.max_iterations => {
                warn!(
                    iteration,
                    pending = additions.len(),
                    "iteration bound reached with dependencies still pending"
                );
                LoopState::Done {
                    outcome: ResolveOutcome::Exhausted(ExhaustionReason::IterationBoundExceeded),
                    artifacts: artifacts.clone(),
                }
            }
            ValidationOutcome::Failed { .. } => LoopState::Extending {
                iteration,
                artifacts: artifacts.clone(),
                additions,
            },
        };

        iterations.push(IterationRecord {
            iteration,
            artifacts,
            descriptor_path,
            outcome,
            candidates,
            unmatched_diagnostics: unmatched,
        });

        Ok(next)
    }

    /// Map diagnostics to candidates, one per artifact, in diagnostic order
    fn classify(
        &self,
        iteration: u32,
        diagnostics: &[String],
    ) -> (Vec<DependencyCandidate>, Vec<String>) {
        let parsed = self.rules.parse(diagnostics);
        let total = parsed.matched.len() + parsed.unmatched.len();
        let classifier = DeployabilityClassifier::new(self.catalog, self.locator);

        let mut seen = BTreeSet::new();
        let candidates: Vec<DependencyCandidate> = parsed
            .matched
            .into_iter()
            .filter(|m| seen.insert(m.artifact.clone()))
            .map(|m| {
                debug!(rule = %m.rule, artifact = %m.artifact, "diagnostic matched");
                classifier.classify(m.artifact, &m.line)
            })
            .collect();

        for line in &parsed.unmatched {
            debug!(iteration, diagnostic = %line, "no rule matched diagnostic");
        }
        self.events.on_event(ResolveEvent::DiagnosticsClassified {
            iteration,
            diagnostics: total,
            unmatched: parsed.unmatched.len(),
        });
        if self.events.wants_detailed_events() {
            for candidate in &candidates {
                self.events.on_event(ResolveEvent::CandidateFound {
                    iteration,
                    artifact: candidate.artifact.clone(),
                    classification: candidate.classification,
                    reason: candidate.reason.clone(),
                });
            }
        }

        (candidates, parsed.unmatched)
    }

    fn extend(
        &self,
        options: &ResolveOptions,
        iteration: u32,
        artifacts: ArtifactSet,
        additions: Vec<ArtifactRef>,
        cancel: &CancelToken,
    ) -> LoopState {
        let proposal = IterationProposal {
            iteration,
            next_iteration: iteration + 1,
            max_iterations: options.max_iterations,
            additions: &additions,
        };
        let approval = self.approver.approve(&proposal);

        if approval == Approval::Stop || cancel.is_cancelled() {
            info!(iteration, "extension declined");
            return LoopState::Done {
                outcome: ResolveOutcome::UserCancelled,
                artifacts,
            };
        }

        let next = artifacts.union(&additions);
        debug!(
            iteration = iteration + 1,
            added = additions.len(),
            total = next.len(),
            "package extended"
        );
        LoopState::Validating {
            iteration: iteration + 1,
            artifacts: next,
        }
    }

    fn finish(
        &self,
        options: &ResolveOptions,
        outcome: ResolveOutcome,
        artifacts: ArtifactSet,
        iterations: Vec<IterationRecord>,
    ) -> DeltaResult<ResolveReport> {
        let final_descriptor = options.final_descriptor();
        write_atomic(
            &final_descriptor,
            generate(&artifacts, &options.api_version).as_str().as_bytes(),
        )?;

        let manual_instructions = match outcome {
            ResolveOutcome::Exhausted(_) => {
                let path = options.manual_instructions_path();
                let instructions = ManualInstructions::from_iterations(
                    Utc::now(),
                    options.target.clone(),
                    outcome.to_string(),
                    &iterations,
                );
                write_manual_instructions(&path, &instructions)?;
                self.events.on_event(ResolveEvent::ManualInstructionsWritten {
                    path: path.clone(),
                    entries: instructions.candidates.len(),
                });
                Some(path)
            }
            _ => None,
        };

        let report_path = options.report_path();
        let document = ReportDocument {
            outcome,
            target: &options.target,
            max_iterations: options.max_iterations,
            final_descriptor: &final_descriptor,
            manual_instructions: manual_instructions.as_ref(),
            iterations: &iterations,
        };
        write_atomic(&report_path, serde_json::to_string_pretty(&document)?.as_bytes())?;

        info!(outcome = %outcome, iterations = iterations.len(), "resolution finished");
        self.events.on_event(ResolveEvent::ResolveFinished {
            outcome: outcome.label().to_string(),
            iterations: iterations.len() as u32,
            final_descriptor: final_descriptor.clone(),
        });

        Ok(ResolveReport {
            outcome,
            iterations,
            final_artifacts: artifacts,
            final_descriptor,
            report_path,
            manual_instructions,
        })
    }
}
