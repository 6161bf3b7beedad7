//! Pipeline configuration
//!
//! Defaults are compiled in; the installer accepts a few environment
//! overrides so mirrors and alternative package managers can be used
//! without rebuilding.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Conventional install location inside the consumer project
pub const TARGET_DIR: &str = "components/notra-editor";

/// Where published registry documents are served from
pub const REGISTRY_BASE_URL: &str =
    "https://raw.githubusercontent.com/levix0501/notra-editor/main/public/r";

/// Component published by this repository
pub const COMPONENT_NAME: &str = "editor";

/// Project manifest, read by the builder and required by the installer
pub const MANIFEST_FILE: &str = "package.json";

/// Default package manager used to install registry dependencies
pub const DEFAULT_PACKAGE_MANAGER: &str = "pnpm";

/// Default HTTP timeout for the registry fetch
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Override for [`REGISTRY_BASE_URL`]
pub const ENV_REGISTRY_URL: &str = "NOTRA_REGISTRY_URL";

/// Override for [`DEFAULT_PACKAGE_MANAGER`]
pub const ENV_PACKAGE_MANAGER: &str = "NOTRA_PACKAGE_MANAGER";

/// Override for [`DEFAULT_FETCH_TIMEOUT`], in whole seconds
pub const ENV_FETCH_TIMEOUT_SECS: &str = "NOTRA_FETCH_TIMEOUT_SECS";

/// Settings for `notra-editor init`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallConfig {
    /// Install location, relative to the project root
    pub target_dir: PathBuf,
    /// Base URL the registry document is fetched from
    pub registry_base_url: String,
    /// Component to fetch (`<base>/<component>.json`)
    pub component_name: String,
    /// Package manager executable (invoked as `<pm> add ...`)
    pub package_manager: String,
    /// Request timeout for the registry fetch
    pub fetch_timeout: Duration,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            target_dir: PathBuf::from(TARGET_DIR),
            registry_base_url: REGISTRY_BASE_URL.to_string(),
            component_name: COMPONENT_NAME.to_string(),
            package_manager: DEFAULT_PACKAGE_MANAGER.to_string(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl InstallConfig {
    /// Defaults with overrides from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = non_empty(lookup(ENV_REGISTRY_URL)) {
            config.registry_base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(pm) = non_empty(lookup(ENV_PACKAGE_MANAGER)) {
            config.package_manager = pm;
        }

        if let Some(raw) = non_empty(lookup(ENV_FETCH_TIMEOUT_SECS)) {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.fetch_timeout = Duration::from_secs(secs),
                _ => tracing::warn!(
                    "Ignoring invalid {}={:?}; using {}s",
                    ENV_FETCH_TIMEOUT_SECS,
                    raw,
                    DEFAULT_FETCH_TIMEOUT.as_secs()
                ),
            }
        }

        config
    }

    /// URL of the registry document for the configured component
    pub fn registry_url(&self) -> String {
        format!("{}/{}.json", self.registry_base_url, self.component_name)
    }

    /// Target directory as shown to the user (always `/`-separated)
    pub fn target_display(&self) -> String {
        crate::paths::to_posix(&self.target_dir)
    }
}

/// Settings for the `build-registry` producer step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Component sources (must contain package.json)
    pub source_dir: PathBuf,
    /// Directory the `<component>.json` document is written to
    pub output_dir: PathBuf,
    /// Registry name, also the output file stem
    pub component_name: String,
}

impl BuildConfig {
    /// Conventional repository layout: `packages/editor` -> `public/r/editor.json`
    pub fn for_repository(root: &Path) -> Self {
        Self {
            source_dir: root.join("packages").join("editor"),
            output_dir: root.join("public").join("r"),
            component_name: COMPONENT_NAME.to_string(),
        }
    }

    /// Path of the document [`crate::registry::build_registry`] writes
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.json", self.component_name))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_registry_url() {
        let config = InstallConfig::default();
        assert_eq!(
            config.registry_url(),
            "https://raw.githubusercontent.com/levix0501/notra-editor/main/public/r/editor.json"
        );
        assert_eq!(config.target_display(), "components/notra-editor");
    }

    #[test]
    fn test_env_overrides() {
        let config = InstallConfig::from_lookup(lookup_from(&[
            (ENV_REGISTRY_URL, "http://127.0.0.1:8080/r/"),
            (ENV_PACKAGE_MANAGER, "npm"),
            (ENV_FETCH_TIMEOUT_SECS, "5"),
        ]));

        assert_eq!(config.registry_url(), "http://127.0.0.1:8080/r/editor.json");
        assert_eq!(config.package_manager, "npm");
        assert_eq!(config.fetch_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_blank_and_invalid_overrides_are_ignored() {
        let config = InstallConfig::from_lookup(lookup_from(&[
            (ENV_REGISTRY_URL, "   "),
            (ENV_FETCH_TIMEOUT_SECS, "soon"),
        ]));

        assert_eq!(config, InstallConfig::default());
    }

    #[test]
    fn test_build_config_layout() {
        let config = BuildConfig::for_repository(Path::new("/repo"));
        assert_eq!(config.source_dir, Path::new("/repo/packages/editor"));
        assert_eq!(config.output_path(), Path::new("/repo/public/r/editor.json"));
    }
}
