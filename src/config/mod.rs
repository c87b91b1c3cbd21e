//! Configuration module for metadelta
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority, applied by the commands)
//! 2. Environment variables (METADELTA_*)
//! 3. `--config <FILE>` or project config (`metadelta.toml`)
//! 4. User config (~/.config/metadelta/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{
    apply_overrides, discover, user_config_path, with_env_overrides, LoadedConfig, ENV_PREFIX,
    PROJECT_CONFIG_FILE,
};
pub use types::{
    is_api_version, CatalogConfig, CompareConfig, Config, CustomRuleConfig, DiagnosticsConfig,
    ManifestConfig, ResolveConfig, ValidatorConfig,
};
