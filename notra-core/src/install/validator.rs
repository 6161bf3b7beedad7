//! Project root validation

use std::path::Path;

use crate::config::MANIFEST_FILE;
use crate::error::ValidationError;

/// Check that `cwd` is a project root, i.e. holds a package.json
///
/// Only the directory itself is checked; parents are not searched.
pub fn validate_project(cwd: &Path) -> Result<(), ValidationError> {
    if cwd.join(MANIFEST_FILE).is_file() {
        Ok(())
    } else {
        Err(ValidationError::ManifestMissing {
            manifest: MANIFEST_FILE.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_valid_project() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("package.json"), "{}").unwrap();

        assert!(validate_project(temp_dir.path()).is_ok());
    }

    #[test]
    fn test_missing_manifest() {
        let temp_dir = TempDir::new().unwrap();

        let err = validate_project(temp_dir.path()).unwrap_err();
        assert!(!err.to_string().is_empty());
        assert!(err.to_string().contains("package.json not found"));
    }

    #[test]
    fn test_manifest_in_subdirectory_does_not_count() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("packages/app");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("package.json"), "{}").unwrap();

        assert!(validate_project(temp_dir.path()).is_err());
    }

    #[test]
    fn test_directory_named_like_manifest_does_not_count() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("package.json")).unwrap();

        assert!(validate_project(temp_dir.path()).is_err());
    }
}
