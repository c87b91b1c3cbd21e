//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating collaborators with infrastructure dependencies
//! - Output formatting (text/NDJSON)
//!
//! ## Structure
//!
//! - `cli` - Command-line definitions
//! - `factory` - Wires config into adapters (dependency injection)
//! - `output` - Console rendering of events and terminal states

pub mod cli;
pub mod factory;
pub mod output;

pub use cli::{CatalogCommands, Cli, Commands};
pub use factory::{create_approver, create_catalog_service, create_event_sink, create_validator};
pub use output::{outcome_message, ConsoleEventSink};
