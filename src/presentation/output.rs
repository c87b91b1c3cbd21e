//! Output Rendering
//!
//! Human-readable progress for compare and resolve runs, plus the summary
//! lines printed when a run ends.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::application::{ResolveOutcome, ResolveReport};
use crate::domain::entities::{Classification, Delta};
use crate::domain::ports::{ResolveEvent, ResolveEventSink};

/// Event sink that prints one line per event
pub struct ConsoleEventSink {
    verbose: u8,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleEventSink {
    pub fn stdout(verbose: u8) -> Self {
        Self::with_writer(verbose, io::stdout())
    }

    pub fn with_writer<W: Write + Send + 'static>(verbose: u8, writer: W) -> Self {
        Self {
            verbose,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn line(&self, text: String) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", text);
        }
    }
}

impl ResolveEventSink for ConsoleEventSink {
    fn on_event(&self, event: ResolveEvent) {
        if self.verbose == 0 && matches!(event, ResolveEvent::DiagnosticsClassified { .. }) {
            return;
        }
        if let Some(text) = render_event(&event) {
            self.line(text);
        }
    }

    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// One console line for `event`, if it is worth showing
pub fn render_event(event: &ResolveEvent) -> Option<String> {
    match event {
        ResolveEvent::CompareCompleted {
            additive,
            destructive,
            unrecognized_folders,
            skipped,
            copied,
        } => {
            let mut text = format!(
                "Delta: {} additive, {} destructive, {} files copied",
                additive, destructive, copied
            );
            if *skipped > 0 {
                text.push_str(&format!(", {} skipped", skipped));
            }
            if !unrecognized_folders.is_empty() {
                text.push_str(&format!(
                    "\n  unrecognized folders: {}",
                    unrecognized_folders.join(", ")
                ));
            }
            Some(text)
        }
        ResolveEvent::ResolveStarted {
            initial_artifacts,
            max_iterations,
            target,
        } => Some(format!(
            "Resolving {} artifacts against {} (at most {} iterations)",
            initial_artifacts, target, max_iterations
        )),
        ResolveEvent::IterationStarted {
            iteration,
            artifacts,
            descriptor,
        } => Some(format!(
            "[{}] validating {} artifacts ({})",
            iteration,
            artifacts,
            descriptor.display()
        )),
        ResolveEvent::IterationFinished { iteration, success } => Some(format!(
            "[{}] validation {}",
            iteration,
            if *success { "passed" } else { "failed" }
        )),
        ResolveEvent::DiagnosticsClassified {
            iteration,
            diagnostics,
            unmatched,
        } => Some(format!(
            "[{}] {} diagnostics, {} unrecognized",
            iteration, diagnostics, unmatched
        )),
        ResolveEvent::CandidateFound {
            iteration,
            artifact,
            classification,
            reason,
        } => {
            let marker = match classification {
                Classification::Deployable => "+",
                Classification::NonDeployable => "!",
            };
            Some(format!("[{}]   {} {}: {}", iteration, marker, artifact, reason))
        }
        ResolveEvent::ManualInstructionsWritten { path, entries } => Some(format!(
            "Manual steps ({} entries) written to {}",
            entries,
            path.display()
        )),
        ResolveEvent::ResolveFinished { .. } => None,
    }
}

pub fn compare_completed(delta: &Delta) -> ResolveEvent {
    ResolveEvent::CompareCompleted {
        additive: delta.additive.len(),
        destructive: delta.destructive.len(),
        unrecognized_folders: delta.unrecognized_folders.iter().cloned().collect(),
        skipped: delta.skipped.len(),
        copied: delta.copied_files,
    }
}

/// Closing message; distinct for each terminal state
pub fn outcome_message(report: &ResolveReport) -> String {
    match report.outcome {
        ResolveOutcome::Succeeded => format!(
            "Succeeded after {} validation(s). Final package: {}",
            report.validations(),
            report.final_descriptor.display()
        ),
        ResolveOutcome::Exhausted(reason) => {
            let mut text = format!("Exhausted ({}): manual steps required.", reason);
            if let Some(path) = &report.manual_instructions {
                text.push_str(&format!(" See {}", path.display()));
            }
            text
        }
        ResolveOutcome::UserCancelled => format!(
            "Cancelled after {} validation(s). Last package: {}",
            report.validations(),
            report.final_descriptor.display()
        ),
    }
}
