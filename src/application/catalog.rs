//! Catalog Service
//!
//! Loads the artifact type catalog: cached copy first, refreshed from the
//! target environment when missing or stale. A failed refresh is never fatal;
//! the cached catalog (or the built-in one) is used with a warning.

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use crate::domain::entities::ArtifactTypeCatalog;
use crate::domain::ports::{CatalogRepository, CatalogSource};
use crate::domain::value_objects::EnvironmentHandle;
use crate::error::DeltaResult;

/// When to query the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPolicy {
    /// Only when the cache is missing or stale
    #[default]
    IfStale,
    Always,
    Never,
}

#[derive(Debug, Clone)]
pub struct CatalogLoadOptions {
    pub target: Option<EnvironmentHandle>,
    pub max_age: Duration,
    pub refresh: RefreshPolicy,
}

impl CatalogLoadOptions {
    pub fn new(target: Option<EnvironmentHandle>, max_age_days: i64) -> Self {
        Self {
            target,
            max_age: Duration::days(max_age_days),
            refresh: RefreshPolicy::IfStale,
        }
    }

    pub fn with_refresh(mut self, refresh: RefreshPolicy) -> Self {
        self.refresh = refresh;
        self
    }
}

/// Where the loaded catalog came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogOrigin {
    Cache,
    Refreshed,
    Builtin,
}

#[derive(Debug, Clone)]
pub struct CatalogLoad {
    pub catalog: ArtifactTypeCatalog,
    pub origin: CatalogOrigin,
    /// Staleness and refresh problems, for display
    pub warnings: Vec<String>,
}

/// Build a catalog from the environment's `(directory, type)` pairs.
pub fn refresh(
    source: &dyn CatalogSource,
    env: &EnvironmentHandle,
    now: DateTime<Utc>,
) -> DeltaResult<ArtifactTypeCatalog> {
    let pairs = source.fetch(env)?;
    info!(target_org = %env, types = pairs.len(), "artifact type catalog refreshed");
    Ok(ArtifactTypeCatalog::from_pairs(pairs, Some(now)))
}

pub struct CatalogService<S, R>
where
    S: CatalogSource,
    R: CatalogRepository,
{
    source: S,
    repository: R,
}

impl<S, R> CatalogService<S, R>
where
    S: CatalogSource,
    R: CatalogRepository,
{
    pub fn new(source: S, repository: R) -> Self {
        Self { source, repository }
    }

    /// Refresh from `env` and persist. Errors are returned to the caller.
    pub fn refresh(&self, env: &EnvironmentHandle, now: DateTime<Utc>) -> DeltaResult<ArtifactTypeCatalog> {
        let catalog = refresh(&self.source, env, now)?;
        self.repository.save(env, &catalog)?;
        Ok(catalog)
    }

    pub fn load(&self, options: &CatalogLoadOptions, now: DateTime<Utc>) -> CatalogLoad {
        let mut warnings = Vec::new();

        let cached = match self.repository.load(options.target.as_ref()) {
            Ok(cached) => cached,
            Err(e) => {
                warnings.push(format!("ignoring unreadable catalog cache: {}", e));
                None
            }
        };

        let stale = cached
            .as_ref()
            .map_or(true, |c| c.is_stale(now, options.max_age));
        let wants_refresh = match options.refresh {
            RefreshPolicy::Always => true,
            RefreshPolicy::IfStale => stale,
            RefreshPolicy::Never => false,
        };

        if wants_refresh {
            if let Some(env) = &options.target {
                match refresh(&self.source, env, now) {
                    Ok(catalog) => {
                        if let Err(e) = self.repository.save(env, &catalog) {
                            warnings.push(format!("could not cache the refreshed catalog: {}", e));
                        }
                        return finish(catalog, CatalogOrigin::Refreshed, warnings);
                    }
                    Err(e) => warnings.push(format!("{}", e)),
                }
            }
        }

        match cached {
            Some(catalog) => {
                if stale {
                    warnings.push(staleness_warning(&catalog, now));
                }
                finish(catalog, CatalogOrigin::Cache, warnings)
            }
            None => {
                warnings.push(
                    "no cached artifact type catalog; using the built-in type list".to_string(),
                );
                finish(ArtifactTypeCatalog::builtin(), CatalogOrigin::Builtin, warnings)
            }
        }
    }
}

fn staleness_warning(catalog: &ArtifactTypeCatalog, now: DateTime<Utc>) -> String {
    match catalog.refreshed_at() {
        Some(at) => format!(
            "artifact type catalog is {} day(s) old; unknown folders may be reported as unrecognized",
            (now - at).num_days()
        ),
        None => "artifact type catalog was never refreshed".to_string(),
    }
}

fn finish(catalog: ArtifactTypeCatalog, origin: CatalogOrigin, warnings: Vec<String>) -> CatalogLoad {
    for warning in &warnings {
        warn!("{}", warning);
    }
    CatalogLoad {
        catalog,
        origin,
        warnings,
    }
}
