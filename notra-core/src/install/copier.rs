//! Writing registry files into the consumer project

use std::path::Path;
use tracing::{debug, warn};

use crate::error::CopyError;
use crate::paths;
use crate::registry::RegistryFile;

/// Outcome of [`copy_files`]
///
/// Copying is not transactional: on failure `copied_files` lists what was
/// already written and those files stay on disk.
#[derive(Debug)]
pub struct CopyReport {
    /// Registry paths written, in input order
    pub copied_files: Vec<String>,
    /// The write that stopped the copy, if any
    pub error: Option<CopyError>,
}

impl CopyReport {
    pub fn success(&self) -> bool {
        self.error.is_none()
    }
}

/// Write `files` under `target_dir` (resolved against `cwd`), in order
///
/// Parent directories are created as needed and existing files are
/// overwritten without warning; confirming that is the caller's job. The
/// first failed write stops the copy.
pub fn copy_files(files: &[RegistryFile], target_dir: &Path, cwd: &Path) -> CopyReport {
    let target = paths::resolve(cwd, target_dir);
    let mut copied_files = Vec::with_capacity(files.len());

    for file in files {
        if !paths::stays_within(&file.path) {
            warn!(
                "Registry path '{}' is not a plain relative path; writing it under {}",
                file.path,
                target.display()
            );
        }

        let destination = paths::join_under(&target, &file.path);
        if let Err(error) = write_file(&destination, &file.content) {
            return CopyReport {
                copied_files,
                error: Some(error),
            };
        }

        debug!("Wrote {}", destination.display());
        copied_files.push(file.path.clone());
    }

    CopyReport {
        copied_files,
        error: None,
    }
}

fn write_file(destination: &Path, content: &str) -> Result<(), CopyError> {
    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent).map_err(|source| CopyError {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    std::fs::write(destination, content).map_err(|source| CopyError {
        path: destination.to_path_buf(),
        source,
    })
}
