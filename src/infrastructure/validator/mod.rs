//! Dry-run validation adapters

mod response;
mod sf_cli;

pub use response::parse_response;
pub use sf_cli::SfCliValidator;
