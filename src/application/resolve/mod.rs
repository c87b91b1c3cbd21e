//! Resolve use case: the bounded dependency-resolution loop

mod options;
mod result;
mod use_case;

pub use options::{ResolveOptions, DEFAULT_MAX_ITERATIONS, DEFAULT_TIMEOUT, FINAL_DESCRIPTOR, REPORT_FILE};
pub use result::{ExhaustionReason, ResolveOutcome, ResolveReport};
pub use use_case::ResolveUseCase;
