//! Infrastructure Layer
//!
//! Concrete implementations of the domain ports: filesystem access, the
//! `sf` CLI collaborators, the catalog cache, prompts and event sinks.

pub mod approval;
pub mod catalog;
pub mod events;
pub mod fs;
pub mod process;
pub mod validator;

pub use approval::DialoguerApprover;
pub use catalog::{SfCliCatalogSource, TomlCatalogRepository};
pub use events::JsonEventSink;
pub use fs::FsSourceLocator;
pub use validator::SfCliValidator;
