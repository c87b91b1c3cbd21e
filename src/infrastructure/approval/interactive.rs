//! Interactive Iteration Approver
//!
//! Prompts on stderr before each extension of the package.

use dialoguer::Confirm;

use crate::domain::ports::{Approval, IterationApprover, IterationProposal};

/// Asks the operator through a terminal confirmation prompt.
///
/// A prompt that cannot be shown (closed stdin, no terminal) counts as a
/// refusal.
#[derive(Debug, Default)]
pub struct DialoguerApprover;

impl DialoguerApprover {
    pub fn new() -> Self {
        Self
    }
}

pub fn proposal_prompt(proposal: &IterationProposal) -> String {
    let listed: Vec<String> = proposal.additions.iter().map(|a| a.to_string()).collect();
    format!(
        "Iteration {} failed. Add {} dependenc{} ({}) and run iteration {}/{}?",
        proposal.iteration,
        proposal.additions.len(),
        if proposal.additions.len() == 1 { "y" } else { "ies" },
        listed.join(", "),
        proposal.next_iteration,
        proposal.max_iterations,
    )
}

impl IterationApprover for DialoguerApprover {
    fn approve(&self, proposal: &IterationProposal) -> Approval {
        let confirmed = Confirm::new()
            .with_prompt(proposal_prompt(proposal))
            .default(true)
            .interact()
            .unwrap_or(false);

        if confirmed {
            Approval::Continue
        } else {
            Approval::Stop
        }
    }
}
