//! Conflict detection for the install target directory

use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

use crate::paths;

/// Files already present under the target directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConflictReport {
    /// True iff `existing_files` is non-empty
    pub has_conflict: bool,
    /// Paths relative to the target directory, `/`-separated
    pub existing_files: Vec<String>,
}

impl ConflictReport {
    fn from_files(existing_files: Vec<String>) -> Self {
        Self {
            has_conflict: !existing_files.is_empty(),
            existing_files,
        }
    }
}

/// List every file under `target_dir` (resolved against `cwd`)
///
/// A missing target, or one holding only empty directories, is not a
/// conflict. Nothing on disk is modified.
pub fn detect_conflicts(target_dir: &Path, cwd: &Path) -> std::io::Result<ConflictReport> {
    let absolute = paths::resolve(cwd, target_dir);

    if !absolute.exists() {
        debug!("No conflicts: {} does not exist", absolute.display());
        return Ok(ConflictReport::default());
    }

    if !absolute.is_dir() {
        return Err(std::io::Error::other(format!(
            "{} exists but is not a directory",
            absolute.display()
        )));
    }

    let mut existing_files = Vec::new();
    for entry in WalkDir::new(&absolute).min_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(relative) = paths::relative_posix(&absolute, entry.path()) {
            existing_files.push(relative);
        }
    }

    debug!(
        "Found {} existing file(s) in {}",
        existing_files.len(),
        absolute.display()
    );

    Ok(ConflictReport::from_files(existing_files))
}
