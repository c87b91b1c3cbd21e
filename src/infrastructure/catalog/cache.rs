//! TOML catalog cache
//!
//! One file per environment under the cache directory:
//! `catalog-<alias>.toml`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::entities::ArtifactTypeCatalog;
use crate::domain::ports::CatalogRepository;
use crate::domain::value_objects::EnvironmentHandle;
use crate::error::{DeltaError, DeltaResult};
use crate::infrastructure::fs::write_atomic;

const CACHE_VERSION: u32 = 1;
const FILE_PREFIX: &str = "catalog-";

#[derive(Debug, Serialize, Deserialize)]
struct TomlCatalog {
    version: u32,
    environment: String,
    refreshed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    types: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct TomlCatalogRepository {
    dir: PathBuf,
}

impl TomlCatalogRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Cache file for `env`. Characters outside `[A-Za-z0-9._-]` become `_`.
    pub fn path_for(&self, env: &EnvironmentHandle) -> PathBuf {
        let safe: String = env
            .alias()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}{}.toml", FILE_PREFIX, safe))
    }

    fn read(path: &Path) -> DeltaResult<TomlCatalog> {
        let content = fs::read_to_string(path)?;
        let cached: TomlCatalog = toml::from_str(&content).map_err(|e| DeltaError::Config {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if cached.version != CACHE_VERSION {
            return Err(DeltaError::Config {
                file: path.to_path_buf(),
                message: format!(
                    "catalog cache version {} (expected {})",
                    cached.version, CACHE_VERSION
                ),
            });
        }
        Ok(cached)
    }

    /// Most recently refreshed cache file of any environment
    fn newest(&self) -> DeltaResult<Option<TomlCatalog>> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Ok(None);
        };

        let mut newest: Option<TomlCatalog> = None;
        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with(FILE_PREFIX) || !name.ends_with(".toml") {
                continue;
            }
            let cached = match Self::read(&entry.path()) {
                Ok(cached) => cached,
                Err(e) => {
                    debug!(path = %entry.path().display(), error = %e, "ignoring unreadable catalog cache");
                    continue;
                }
            };
            if newest
                .as_ref()
                .map_or(true, |n| cached.refreshed_at > n.refreshed_at)
            {
                newest = Some(cached);
            }
        }
        Ok(newest)
    }
}

impl CatalogRepository for TomlCatalogRepository {
    fn load(&self, env: Option<&EnvironmentHandle>) -> DeltaResult<Option<ArtifactTypeCatalog>> {
        let cached = match env {
            Some(env) => {
                let path = self.path_for(env);
                if !path.exists() {
                    return Ok(None);
                }
                Some(Self::read(&path)?)
            }
            None => self.newest()?,
        };

        Ok(cached.map(|c| ArtifactTypeCatalog::from_pairs(c.types, c.refreshed_at)))
    }

    fn save(&self, env: &EnvironmentHandle, catalog: &ArtifactTypeCatalog) -> DeltaResult<()> {
        let cached = TomlCatalog {
            version: CACHE_VERSION,
            environment: env.alias().to_string(),
            refreshed_at: catalog.refreshed_at(),
            types: catalog
                .entries()
                .map(|(d, t)| (d.to_string(), t.to_string()))
                .collect(),
        };
        let content = toml::to_string_pretty(&cached).map_err(|e| DeltaError::Config {
            file: self.path_for(env),
            message: e.to_string(),
        })?;
        write_atomic(&self.path_for(env), content.as_bytes())
    }
}
