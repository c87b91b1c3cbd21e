//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::services::diagnostics::{DiagnosticRule, DiagnosticRules};
use crate::domain::value_objects::{ConfigWarning, DEFAULT_IGNORE_FILE};
use crate::error::{DeltaError, DeltaResult};

use super::loader;

/// Package descriptor settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestConfig {
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            api_version: default_api_version(),
        }
    }
}

fn default_api_version() -> String {
    "60.0".to_string()
}

/// Artifact type catalog cache settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_max_age_days")]
    pub max_age_days: i64,

    /// Defaults to the platform cache directory
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            max_age_days: default_max_age_days(),
            cache_dir: None,
        }
    }
}

fn default_max_age_days() -> i64 {
    crate::domain::entities::DEFAULT_MAX_AGE_DAYS
}

impl CatalogConfig {
    pub fn effective_cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .map(|d| d.join("metadelta"))
                .unwrap_or_else(|| PathBuf::from(".metadelta/cache"))
        })
    }
}

/// Dependency-resolution loop settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveConfig {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Per-validation timeout
    #[serde(default = "default_timeout_minutes")]
    pub timeout_minutes: u64,

    /// File name of the manual instructions, relative to the work directory
    #[serde(default = "default_manual_instructions")]
    pub manual_instructions: String,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            timeout_minutes: default_timeout_minutes(),
            manual_instructions: default_manual_instructions(),
        }
    }
}

fn default_max_iterations() -> u32 {
    10
}

fn default_timeout_minutes() -> u64 {
    33
}

fn default_manual_instructions() -> String {
    "MANUAL_STEPS.md".to_string()
}

/// Validation collaborator settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    #[serde(default = "default_sf_bin")]
    pub sf_bin: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            sf_bin: default_sf_bin(),
        }
    }
}

fn default_sf_bin() -> String {
    "sf".to_string()
}

/// Tree comparison settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Ignore file looked up at the source tree root
    #[serde(default = "default_ignore_file")]
    pub ignore_file: String,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            ignore_file: default_ignore_file(),
        }
    }
}

fn default_ignore_file() -> String {
    DEFAULT_IGNORE_FILE.to_string()
}

/// Extra diagnostic rule, consulted after the built-in table
///
/// ```toml
/// [[diagnostics.rules]]
/// name = "flow-not-found"
/// pattern = "Flow '(?P<name>[^']+)' not found"
/// type = "Flow"
/// ```
///
/// Without `type` the pattern must capture a `type` group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomRuleConfig {
    pub name: String,
    pub pattern: String,
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    #[serde(default)]
    pub rules: Vec<CustomRuleConfig>,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub manifest: ManifestConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub resolve: ResolveConfig,

    #[serde(default)]
    pub validator: ValidatorConfig,

    #[serde(default)]
    pub compare: CompareConfig,

    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> DeltaResult<Self> {
        Ok(Self::load_with_warnings(path)?.0)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> DeltaResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self, file: &Path) -> DeltaResult<()> {
        let invalid = |message: String| DeltaError::Config {
            file: file.to_path_buf(),
            message,
        };

        if !is_api_version(&self.manifest.api_version) {
            return Err(invalid(format!(
                "manifest.api_version must look like \"60.0\", got \"{}\"",
                self.manifest.api_version
            )));
        }
        if self.resolve.max_iterations == 0 {
            return Err(invalid("resolve.max_iterations must be at least 1".into()));
        }
        if self.resolve.timeout_minutes == 0 {
            return Err(invalid("resolve.timeout_minutes must be at least 1".into()));
        }
        if self.catalog.max_age_days < 0 {
            return Err(invalid("catalog.max_age_days must not be negative".into()));
        }
        self.diagnostic_rules()
            .map_err(|e| invalid(e.to_string()))?;
        Ok(())
    }

    /// Built-in rules followed by the configured ones
    pub fn diagnostic_rules(&self) -> Result<DiagnosticRules, regex::Error> {
        let mut rules = DiagnosticRules::builtin();
        for custom in &self.diagnostics.rules {
            let rule = match &custom.type_name {
                Some(type_name) => DiagnosticRule::fixed(&custom.name, &custom.pattern, type_name)?,
                None => DiagnosticRule::captured(&custom.name, &custom.pattern)?,
            };
            rules.push(rule);
        }
        Ok(rules)
    }
}

/// `<major>.<minor>` with digits only
pub fn is_api_version(value: &str) -> bool {
    match value.split_once('.') {
        Some((major, minor)) => {
            !major.is_empty()
                && !minor.is_empty()
                && major.bytes().all(|b| b.is_ascii_digit())
                && minor.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}
