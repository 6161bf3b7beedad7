//! Registry building (producer side)
//!
//! Walks a component's source directory and writes `<component>.json`.

use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use super::{PackageManifest, Registry, RegistryFile};
use crate::config::{BuildConfig, MANIFEST_FILE};
use crate::error::BuildError;
use crate::paths;

/// Directories never descended into
pub const EXCLUDED_DIRS: &[&str] = &["node_modules", ".git"];

/// Bookkeeping files that are not part of the component
pub const EXCLUDED_FILES: &[&str] = &[MANIFEST_FILE, ".gitkeep", "tsconfig.json"];

/// Summary of a successful build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutput {
    /// Where the registry document was written
    pub output_path: PathBuf,
    /// Number of files embedded
    pub file_count: usize,
    /// Number of dependencies declared
    pub dependency_count: usize,
    /// `sha256:<hex>` of the written document
    pub digest: String,
}

/// Build the registry for `config.source_dir` and write it to
/// `config.output_path()`
///
/// The output directory is created if needed and an existing document is
/// overwritten.
pub fn build_registry(config: &BuildConfig) -> Result<BuildOutput, BuildError> {
    let source_dir = &config.source_dir;

    if !source_dir.is_dir() {
        return Err(BuildError::SourceNotFound {
            path: source_dir.clone(),
        });
    }

    std::fs::create_dir_all(&config.output_dir).map_err(|source| BuildError::Io {
        path: config.output_dir.clone(),
        source,
    })?;

    let manifest = PackageManifest::from_file(&source_dir.join(MANIFEST_FILE))?;
    let files = collect_files(source_dir)?;

    let registry = Registry {
        name: config.component_name.clone(),
        version: manifest.version_or_default(),
        description: manifest.description_or_default(),
        files,
        dependencies: manifest.registry_dependencies(),
    };

    let content = registry.to_json_pretty()?;
    let output_path = config.output_path();
    std::fs::write(&output_path, &content).map_err(|source| BuildError::Io {
        path: output_path.clone(),
        source,
    })?;

    let digest = format!("sha256:{:x}", Sha256::digest(content.as_bytes()));

    info!(
        "Built registry '{}' v{}: {} files, {} dependencies -> {}",
        registry.name,
        registry.version,
        registry.files.len(),
        registry.dependencies.len(),
        output_path.display()
    );

    Ok(BuildOutput {
        output_path,
        file_count: registry.files.len(),
        dependency_count: registry.dependencies.len(),
        digest,
    })
}

/// Every non-excluded regular file under `source_dir`, read verbatim
///
/// Entries are visited in file-name order so repeated builds of the same
/// tree produce identical documents.
fn collect_files(source_dir: &Path) -> Result<Vec<RegistryFile>, BuildError> {
    let mut files = Vec::new();

    let walker = WalkDir::new(source_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_excluded_dir(entry));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() || is_excluded_file(&entry) {
            continue;
        }

        let relative = paths::relative_posix(source_dir, entry.path())
            .unwrap_or_else(|| paths::to_posix(entry.path()));

        let content = std::fs::read_to_string(entry.path()).map_err(|source| BuildError::Io {
            path: entry.path().to_path_buf(),
            source,
        })?;

        debug!("Adding {} ({} bytes)", relative, content.len());
        files.push(RegistryFile {
            path: relative,
            content,
        });
    }

    Ok(files)
}

fn is_excluded_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| EXCLUDED_DIRS.contains(&name))
}

fn is_excluded_file(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| EXCLUDED_FILES.contains(&name))
}
