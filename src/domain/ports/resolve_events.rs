//! Resolve Event Port
//!
//! Observable progress of compare and resolve runs, used for console output
//! and NDJSON event streams.

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::entities::Classification;
use crate::domain::value_objects::ArtifactRef;

/// Event emitted while comparing trees or resolving dependencies
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ResolveEvent {
    /// Delta computed
    CompareCompleted {
        additive: usize,
        destructive: usize,
        unrecognized_folders: Vec<String>,
        skipped: usize,
        copied: usize,
    },

    /// Resolution run started
    ResolveStarted {
        initial_artifacts: usize,
        max_iterations: u32,
        target: String,
    },

    /// Descriptor written and validation requested
    IterationStarted {
        iteration: u32,
        artifacts: usize,
        descriptor: PathBuf,
    },

    /// Validation failed and diagnostics were classified
    DiagnosticsClassified {
        iteration: u32,
        diagnostics: usize,
        unmatched: usize,
    },

    /// One dependency candidate
    CandidateFound {
        iteration: u32,
        artifact: ArtifactRef,
        classification: Classification,
        reason: String,
    },

    /// Validation finished for an iteration
    IterationFinished { iteration: u32, success: bool },

    /// Manual instructions written
    ManualInstructionsWritten { path: PathBuf, entries: usize },

    /// Terminal state reached
    ResolveFinished {
        outcome: String,
        iterations: u32,
        final_descriptor: PathBuf,
    },
}

/// Trait for receiving resolve events
///
/// - `ConsoleEventSink`: human-readable lines
/// - `JsonEventSink`: NDJSON stream for CI
/// - `NoopEventSink`: silent
pub trait ResolveEventSink: Send + Sync {
    fn on_event(&self, event: ResolveEvent);

    /// Whether the sink wants per-candidate events
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

pub struct NoopEventSink;

impl ResolveEventSink for NoopEventSink {
    fn on_event(&self, _event: ResolveEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
