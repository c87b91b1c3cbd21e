//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `CompareUseCase` - Delta between two retrieved trees, packaged into a directory
//! - `ResolveUseCase` - Bounded dry-run validation loop that adds missing dependencies
//! - `CatalogService` - Loads, refreshes and caches the artifact type catalog
//!
//! ## Services
//!
//! - `render_manual_instructions` - Markdown checklist of non-deployable dependencies

pub mod catalog;
pub mod compare;
pub mod instructions;
pub mod resolve;

pub use catalog::{
    CatalogLoad, CatalogLoadOptions, CatalogOrigin, CatalogService, RefreshPolicy,
};
pub use compare::{write_package, CompareOptions, CompareUseCase};
pub use instructions::{render_manual_instructions, write_manual_instructions, ManualInstructions};
pub use resolve::{
    ExhaustionReason, ResolveOptions, ResolveOutcome, ResolveReport, ResolveUseCase,
};
