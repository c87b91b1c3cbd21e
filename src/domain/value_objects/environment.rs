//! Target environment handle

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque handle naming an authenticated environment (an org alias or username).
///
/// Authentication itself is owned by the platform CLI; this is only the name
/// passed through to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnvironmentHandle(String);

impl EnvironmentHandle {
    pub fn new(alias: impl Into<String>) -> Self {
        Self(alias.into())
    }

    pub fn alias(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EnvironmentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EnvironmentHandle {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EnvironmentHandle {
    fn from(s: String) -> Self {
        Self(s)
    }
}
