//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::value_objects::ConfigWarning;
use crate::error::{DeltaError, DeltaResult};

use super::types::Config;

/// Project configuration file, looked up in the project directory
pub const PROJECT_CONFIG_FILE: &str = "metadelta.toml";

/// Prefix of the environment overrides
pub const ENV_PREFIX: &str = "METADELTA_";

/// Configuration together with where it came from
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: Config,
    /// File the configuration was read from, `None` for defaults
    pub source: Option<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> DeltaResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| DeltaError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Resolve the configuration file and apply environment overrides.
///
/// The first existing file wins: `explicit`, then `<project>/metadelta.toml`,
/// then the user file. An explicit file that does not exist is an error.
pub fn discover(explicit: Option<&Path>, project_root: &Path) -> DeltaResult<LoadedConfig> {
    let candidate = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(DeltaError::Config {
                    file: path.to_path_buf(),
                    message: "configuration file not found".to_string(),
                });
            }
            Some(path.to_path_buf())
        }
        None => {
            let project = project_root.join(PROJECT_CONFIG_FILE);
            if project.is_file() {
                Some(project)
            } else {
                user_config_path().filter(|p| p.is_file())
            }
        }
    };

    let mut loaded = match candidate {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration");
            let (config, warnings) = load_with_warnings(&path)?;
            LoadedConfig {
                config,
                source: Some(path),
                warnings,
            }
        }
        None => LoadedConfig::default(),
    };

    loaded.config = with_env_overrides(loaded.config);
    let file = loaded
        .source
        .clone()
        .unwrap_or_else(|| PathBuf::from("<defaults>"));
    loaded.config.validate(&file)?;
    Ok(loaded)
}

/// `~/.config/metadelta/config.toml`, honoring `XDG_CONFIG_HOME`
pub fn user_config_path() -> Option<PathBuf> {
    dirs_config_dir().map(|d| d.join("metadelta").join("config.toml"))
}

/// Apply environment variable overrides (METADELTA_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Apply overrides from `lookup`; unparseable values are ignored with a warning
pub fn apply_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

    if let Some(version) = var("API_VERSION") {
        config.manifest.api_version = version;
    }
    if let Some(value) = var("MAX_ITERATIONS") {
        match value.trim().parse() {
            Ok(n) => config.resolve.max_iterations = n,
            Err(_) => warn!(value = %value, "ignoring invalid METADELTA_MAX_ITERATIONS"),
        }
    }
    if let Some(value) = var("TIMEOUT_MINUTES") {
        match value.trim().parse() {
            Ok(n) => config.resolve.timeout_minutes = n,
            Err(_) => warn!(value = %value, "ignoring invalid METADELTA_TIMEOUT_MINUTES"),
        }
    }
    if let Some(bin) = var("SF_BIN") {
        if !bin.trim().is_empty() {
            config.validator.sf_bin = bin;
        }
    }
    if let Some(value) = var("CATALOG_MAX_AGE_DAYS") {
        match value.trim().parse() {
            Ok(n) => config.catalog.max_age_days = n,
            Err(_) => warn!(value = %value, "ignoring invalid METADELTA_CATALOG_MAX_AGE_DAYS"),
        }
    }

    config
}

/// Get XDG config directory
fn dirs_config_dir() -> Option<PathBuf> {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "manifest",
        "api_version",
        "catalog",
        "max_age_days",
        "cache_dir",
        "resolve",
        "max_iterations",
        "timeout_minutes",
        "manual_instructions",
        "validator",
        "sf_bin",
        "compare",
        "ignore_file",
        "diagnostics",
        "rules",
        "name",
        "pattern",
        "type",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
