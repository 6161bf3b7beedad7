//! Error types for the registry pipeline with clear, actionable messages

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while building a registry artifact
#[derive(Error, Debug)]
pub enum BuildError {
    /// The component source directory does not exist
    #[error("Source directory not found: {}", .path.display())]
    SourceNotFound { path: PathBuf },

    /// Reading a source file or writing the artifact failed
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The walk over the source tree failed
    #[error("Failed to traverse source directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// package.json is not valid JSON or has an unexpected shape
    #[error("Failed to parse manifest {}: {source}", .path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Serializing the registry document failed
    #[error("Failed to serialize registry: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors produced while fetching a registry over HTTP
///
/// Every variant renders with the `Failed to fetch registry:` prefix so the
/// message can be shown to the user as-is.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The HTTP client could not be constructed
    #[error("Failed to fetch registry: could not create HTTP client: {0}")]
    Client(String),

    /// The server answered with a non-2xx status
    #[error("Failed to fetch registry: HTTP {code} {reason}")]
    Status { code: u16, reason: String },

    /// Network error, timeout, or failure reading the body
    #[error("Failed to fetch registry: {0}")]
    Transport(String),

    /// The body was not a registry document
    #[error("Failed to fetch registry: {0}")]
    Parse(String),
}

impl FetchError {
    /// HTTP status code, when the failure came from the server
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FetchError::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// The working directory is not a project root
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{manifest} not found. Please run this command in a project root directory.")]
    ManifestMissing { manifest: String },
}

/// A single file write failed during copying
#[derive(Error, Debug)]
#[error("Failed to copy files: {}: {source}", .path.display())]
pub struct CopyError {
    /// Destination that could not be written
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Dependency installation failed; the user can run `manual_command` instead
#[derive(Error, Debug)]
pub enum DependencyInstallError {
    /// The package manager could not be started (usually not on PATH)
    #[error("Failed to install dependencies: could not run `{program}`: {source}")]
    Spawn {
        program: String,
        manual_command: String,
        #[source]
        source: std::io::Error,
    },

    /// The package manager ran and exited unsuccessfully
    #[error("Failed to install dependencies: `{manual_command}` exited with {status}{}", format_stderr(.stderr))]
    Failed {
        manual_command: String,
        status: String,
        stderr: String,
    },
}

impl DependencyInstallError {
    /// The command the user should run by hand
    pub fn manual_command(&self) -> &str {
        match self {
            DependencyInstallError::Spawn { manual_command, .. }
            | DependencyInstallError::Failed { manual_command, .. } => manual_command,
        }
    }
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n{trimmed}")
    }
}
