//! Producer manifest parsing (package.json)
//!
//! Only the fields the registry carries are read: `version`,
//! `description`, and `dependencies`. Everything else is ignored.

use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

use super::RegistryDependency;
use crate::error::BuildError;

/// Version used when package.json has none
pub const DEFAULT_VERSION: &str = "1.0.0";

/// The parts of package.json the builder needs
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Declaration order is preserved
    #[serde(default)]
    pub dependencies: IndexMap<String, String>,
}

impl PackageManifest {
    /// Load a manifest from a file path
    pub fn from_file(path: &Path) -> Result<Self, BuildError> {
        let content = std::fs::read_to_string(path).map_err(|source| BuildError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| BuildError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Manifest version, or [`DEFAULT_VERSION`] when absent or empty
    pub fn version_or_default(&self) -> String {
        self.version
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_VERSION)
            .to_string()
    }

    /// Manifest description, or an empty string
    pub fn description_or_default(&self) -> String {
        self.description.clone().unwrap_or_default()
    }

    /// Dependencies in declaration order with range qualifiers stripped
    pub fn registry_dependencies(&self) -> Vec<RegistryDependency> {
        self.dependencies
            .iter()
            .map(|(name, version)| RegistryDependency {
                name: name.clone(),
                version: strip_range_qualifier(version).to_string(),
            })
            .collect()
    }
}

/// Drop one leading `^` or `~` from a version range
///
/// Only a single qualifier is removed; anything else is passed through
/// untouched.
pub fn strip_range_qualifier(version: &str) -> &str {
    version
        .strip_prefix('^')
        .or_else(|| version.strip_prefix('~'))
        .unwrap_or(version)
}
