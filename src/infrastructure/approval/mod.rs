//! Operator approval adapters

mod interactive;

pub use interactive::{proposal_prompt, DialoguerApprover};
