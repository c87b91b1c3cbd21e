//! Iteration Approver Port
//!
//! Asks the operator whether the resolution loop may extend the package and
//! validate again. Implementations can be interactive (prompting) or fixed.

use crate::domain::value_objects::ArtifactRef;

/// What the next iteration would add
#[derive(Debug, Clone)]
pub struct IterationProposal<'a> {
    /// Iteration that failed
    pub iteration: u32,
    /// Iteration that would run next
    pub next_iteration: u32,
    pub max_iterations: u32,
    /// Deployable dependencies that would be added
    pub additions: &'a [ArtifactRef],
}

/// Operator decision for one proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Approval {
    Continue,
    Stop,
}

/// Trait for approving each extension of the package.
///
/// - `ApproveAll`: `--yes`, never prompts
/// - `DenyAll`: non-interactive sessions without `--yes`
/// - `DialoguerApprover`: terminal prompt
pub trait IterationApprover: Send + Sync {
    fn approve(&self, proposal: &IterationProposal) -> Approval;
}

pub struct ApproveAll;

impl IterationApprover for ApproveAll {
    fn approve(&self, _proposal: &IterationProposal) -> Approval {
        Approval::Continue
    }
}

pub struct DenyAll;

impl IterationApprover for DenyAll {
    fn approve(&self, _proposal: &IterationProposal) -> Approval {
        Approval::Stop
    }
}
