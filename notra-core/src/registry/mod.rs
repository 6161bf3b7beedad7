//! Registry documents - the exchange format between build and install
//!
//! A registry is one JSON document per component listing every source file
//! with its full text, plus the npm dependencies those files import.
//!
//! ```text
//! {
//!   "name": "editor",
//!   "version": "1.2.0",
//!   "description": "...",
//!   "files": [ { "path": "ui/mark-button.tsx", "content": "..." } ],
//!   "dependencies": [ { "name": "@tiptap/react", "version": "2.11.5" } ]
//! }
//! ```
//!
//! There is no envelope, checksum, or schema version; compatibility is by
//! convention only.

mod builder;
mod fetcher;
mod manifest;

use serde::{Deserialize, Serialize};

pub use builder::{build_registry, BuildOutput, EXCLUDED_DIRS, EXCLUDED_FILES};
pub use fetcher::{fetch_registry, RegistryClient};
pub use manifest::{strip_range_qualifier, PackageManifest, DEFAULT_VERSION};

/// A component's files and dependencies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    /// Component identifier
    pub name: String,

    /// Version from the producer's package.json
    pub version: String,

    /// Description from the producer's package.json
    pub description: String,

    /// Source files in traversal order
    pub files: Vec<RegistryFile>,

    /// npm dependencies in declaration order
    pub dependencies: Vec<RegistryDependency>,
}

/// One source file; `content` is carried verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryFile {
    /// Relative path with `/` separators
    pub path: String,

    /// Exact file text
    pub content: String,
}

/// One npm dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryDependency {
    /// Package name, possibly scoped (`@scope/name`)
    pub name: String,

    /// Version without a leading `^` or `~`
    pub version: String,
}

impl RegistryDependency {
    /// `name@version`, the form package managers accept
    pub fn spec(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }
}

impl Registry {
    /// Parse a registry document
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Serialize as pretty-printed JSON (two-space indent)
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn sample() -> Registry {
        Registry {
            name: "editor".to_string(),
            version: "1.2.0".to_string(),
            description: "Notion-style editor".to_string(),
            files: vec![
                RegistryFile {
                    path: "core/editor.tsx".to_string(),
                    content: "export function Editor() {}\r\n".to_string(),
                },
                RegistryFile {
                    path: "i18n/messages/zh.ts".to_string(),
                    content: "export const zh = { bold: '加粗' };\n".to_string(),
                },
            ],
            dependencies: vec![RegistryDependency {
                name: "@tiptap/react".to_string(),
                version: "2.11.5".to_string(),
            }],
        }
    }

    #[test]
    fn test_wire_format_field_names() {
        let json = sample().to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let mut keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort();
        assert_eq!(
            keys,
            vec!["dependencies", "description", "files", "name", "version"]
        );
        assert_eq!(value["files"][0]["path"], "core/editor.tsx");
        assert_eq!(value["dependencies"][0]["name"], "@tiptap/react");
        assert!(json.contains("\n  \"name\": \"editor\""));
    }

    #[test]
    fn test_roundtrip_preserves_crlf_and_unicode() {
        let registry = sample();
        let parsed = Registry::from_json(&registry.to_json_pretty().unwrap()).unwrap();
        assert_eq!(parsed, registry);
        assert_eq!(parsed.files[0].content.as_bytes(), b"export function Editor() {}\r\n");
    }

    #[test]
    fn test_roundtrip_empty_collections() {
        let registry = Registry {
            name: "empty".to_string(),
            version: "0.0.1".to_string(),
            description: String::new(),
            files: vec![],
            dependencies: vec![],
        };
        let parsed = Registry::from_json(&registry.to_json_pretty().unwrap()).unwrap();
        assert_eq!(parsed, registry);
    }

    #[test]
    fn test_dependency_spec() {
        assert_eq!(sample().dependencies[0].spec(), "@tiptap/react@2.11.5");
    }

    proptest! {
        #[test]
        fn prop_roundtrip(
            name in "\\PC{0,20}",
            files in proptest::collection::vec(("[a-z0-9_/.-]{1,30}", any::<String>()), 0..8),
            deps in proptest::collection::vec(("@?[a-z0-9/-]{1,20}", "[0-9.]{1,8}"), 0..5),
        ) {
            let registry = Registry {
                name,
                version: "1.0.0".to_string(),
                description: String::new(),
                files: files
                    .into_iter()
                    .map(|(path, content)| RegistryFile { path, content })
                    .collect(),
                dependencies: deps
                    .into_iter()
                    .map(|(name, version)| RegistryDependency { name, version })
                    .collect(),
            };
            let json = registry.to_json_pretty().unwrap();
            prop_assert_eq!(Registry::from_json(&json).unwrap(), registry);
        }
    }
}
