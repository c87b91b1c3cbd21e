//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod approver;
pub mod catalog_repository;
pub mod catalog_source;
pub mod resolve_events;
pub mod source_locator;
pub mod validator;

pub use approver::{ApproveAll, Approval, DenyAll, IterationApprover, IterationProposal};
pub use catalog_repository::CatalogRepository;
pub use catalog_source::{CatalogSource, CatalogSourceError};
pub use resolve_events::{NoopEventSink, ResolveEvent, ResolveEventSink};
pub use source_locator::{SourceLocator, SourceQuery};
pub use validator::{ValidationCallError, ValidationRequest, Validator};
