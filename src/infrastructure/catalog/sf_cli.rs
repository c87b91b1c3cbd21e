//! Catalog refresh through `sf org list metadata-types`.

use std::process::Command;

use serde::Deserialize;
use tracing::debug;

use crate::domain::ports::{CatalogSource, CatalogSourceError};
use crate::domain::value_objects::EnvironmentHandle;

#[derive(Debug, Deserialize)]
struct Envelope {
    status: i32,
    #[serde(default)]
    result: Option<ListResult>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ListResult {
    metadata_objects: Vec<MetadataObject>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetadataObject {
    #[serde(default)]
    directory_name: Option<String>,
    xml_name: String,
}

/// Extract `(directoryName, xmlName)` pairs from the CLI's JSON output.
pub fn parse_metadata_types(
    env: &EnvironmentHandle,
    raw: &str,
) -> Result<Vec<(String, String)>, CatalogSourceError> {
    let json = raw.find('{').map_or(raw, |start| &raw[start..]);
    let envelope: Envelope =
        serde_json::from_str(json).map_err(|e| CatalogSourceError::Unparseable(e.to_string()))?;

    if envelope.status != 0 {
        return Err(CatalogSourceError::Failed {
            env: env.alias().to_string(),
            message: envelope
                .message
                .unwrap_or_else(|| format!("status {}", envelope.status)),
        });
    }

    let pairs: Vec<(String, String)> = envelope
        .result
        .unwrap_or_default()
        .metadata_objects
        .into_iter()
        .filter_map(|o| match o.directory_name {
            Some(dir) if !dir.is_empty() => Some((dir, o.xml_name)),
            _ => None,
        })
        .collect();

    if pairs.is_empty() {
        return Err(CatalogSourceError::Empty(env.alias().to_string()));
    }
    Ok(pairs)
}

#[derive(Debug, Clone)]
pub struct SfCliCatalogSource {
    program: String,
}

impl SfCliCatalogSource {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl CatalogSource for SfCliCatalogSource {
    fn fetch(&self, env: &EnvironmentHandle) -> Result<Vec<(String, String)>, CatalogSourceError> {
        debug!(target_org = %env, "querying metadata types");
        let output = Command::new(&self.program)
            .args(["org", "list", "metadata-types", "--target-org"])
            .arg(env.alias())
            .arg("--json")
            .output()
            .map_err(|source| CatalogSourceError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        parse_metadata_types(env, &String::from_utf8_lossy(&output.stdout))
    }
}
