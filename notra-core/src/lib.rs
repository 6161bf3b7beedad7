//! notra-editor registry pipeline
//!
//! The editor is distributed by copying its sources into a project rather
//! than installing a package. This crate holds both halves of that transfer:
//!
//! ```text
//! packages/editor/          ← component sources + package.json
//!        │
//!        ▼  registry::build_registry
//! public/r/editor.json      ← Registry (files + dependencies)
//!        │
//!        ▼  registry::fetch_registry (HTTP)
//! install::detect_conflicts → install::copy_files → install::install_dependencies
//!        │
//!        ▼
//! components/notra-editor/  ← copied sources in the consumer project
//! ```

pub mod config;
pub mod error;
pub mod install;
pub mod paths;
pub mod registry;

pub use config::{BuildConfig, InstallConfig};
pub use error::{BuildError, CopyError, DependencyInstallError, FetchError, ValidationError};
pub use registry::{Registry, RegistryDependency, RegistryFile};
