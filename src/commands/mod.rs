//! Command handlers for the binary

pub mod catalog;
pub mod compare;
mod project_root;
pub mod promote;
pub mod resolve;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use chrono::Utc;
use tracing::{info, warn};

use metadelta::application::{CatalogLoadOptions, CatalogOrigin};
use metadelta::config::{self, Config};
use metadelta::domain::entities::ArtifactTypeCatalog;
use metadelta::presentation::cli::Cli;
use metadelta::presentation::factory::create_catalog_service;
use metadelta::{CancelToken, EnvironmentHandle};

/// Shared state of one invocation
pub struct Context {
    pub config: Config,
    pub json: bool,
    pub verbose: u8,
    pub cancel: CancelToken,
    pub cwd: PathBuf,
}

impl Context {
    pub fn load(cli: &Cli, cancel: CancelToken) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        let project_root = project_root::discover_project_root(&cwd);
        let loaded = config::discover(cli.config.as_deref(), &project_root)?;

        if let Some(source) = &loaded.source {
            info!(config = %source.display(), "configuration loaded");
        }
        for warning in &loaded.warnings {
            warn!("{}", warning);
        }

        Ok(Self {
            config: loaded.config,
            json: cli.json,
            verbose: cli.verbose,
            cancel,
            cwd,
        })
    }

    /// Catalog for `target`, refreshed when stale. Never fails.
    pub fn catalog(&self, target: Option<&str>) -> ArtifactTypeCatalog {
        let service = create_catalog_service(&self.config);
        let options = CatalogLoadOptions::new(
            target.map(EnvironmentHandle::from),
            self.config.catalog.max_age_days,
        );
        let load = service.load(&options, Utc::now());
        if load.origin == CatalogOrigin::Builtin {
            info!("using the built-in artifact type catalog");
        }
        load.catalog
    }
}
