//! Domain Layer
//!
//! The core of metadelta: catalog, path resolution, manifests and
//! diagnostics, with no direct I/O.
//!
//! ## Structure
//!
//! - `entities/` - ArtifactSet, catalog, delta and resolution records
//! - `value_objects/` - ArtifactRef, ContentHash, CancelToken, ignore patterns
//! - `services/` - PathResolver, manifest, diagnostics, deployability
//! - `ports/` - Validator, CatalogSource, SourceLocator, approver, events

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
