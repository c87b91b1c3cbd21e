//! CatalogRepository port - persistence of the refreshed type catalog
//!
//! The cache is keyed by environment so two environments never share a
//! catalog that only one of them reported.

use crate::domain::entities::ArtifactTypeCatalog;
use crate::domain::value_objects::EnvironmentHandle;
use crate::error::DeltaResult;

pub trait CatalogRepository: Send + Sync {
    /// Cached catalog for `env`, `None` when nothing was cached yet
    fn load(&self, env: Option<&EnvironmentHandle>) -> DeltaResult<Option<ArtifactTypeCatalog>>;

    fn save(&self, env: &EnvironmentHandle, catalog: &ArtifactTypeCatalog) -> DeltaResult<()>;
}
