//! Catalog Source Port
//!
//! Queries the live environment for its `(directory, type)` pairs.

use thiserror::Error;

use crate::domain::value_objects::EnvironmentHandle;

#[derive(Debug, Error)]
pub enum CatalogSourceError {
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog query for '{env}' failed: {message}")]
    Failed { env: String, message: String },

    #[error("catalog response could not be parsed: {0}")]
    Unparseable(String),

    #[error("catalog query for '{0}' returned no types")]
    Empty(String),
}

pub trait CatalogSource: Send + Sync {
    /// `(directory name, type name)` pairs known to `env`
    fn fetch(&self, env: &EnvironmentHandle) -> Result<Vec<(String, String)>, CatalogSourceError>;
}
