//! Installing registry dependencies with the project's package manager

use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

use crate::config::DEFAULT_PACKAGE_MANAGER;
use crate::error::DependencyInstallError;
use crate::registry::RegistryDependency;

/// Subcommand that adds packages for pnpm, npm, yarn, and bun alike
const ADD_SUBCOMMAND: &str = "add";

/// What [`DependencyInstaller::install`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Nothing to install; no process was started
    Skipped,
    /// The package manager exited successfully
    Installed,
}

/// Runs `<program> add name@version ...` in a project directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyInstaller {
    program: String,
}

impl Default for DependencyInstaller {
    fn default() -> Self {
        Self::new(DEFAULT_PACKAGE_MANAGER)
    }
}

impl DependencyInstaller {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// The install command as the user would type it
    ///
    /// Tokens follow input order; duplicates are kept.
    pub fn command_line(&self, dependencies: &[RegistryDependency]) -> String {
        let mut parts = vec![self.program.clone(), ADD_SUBCOMMAND.to_string()];
        parts.extend(dependencies.iter().map(RegistryDependency::spec));
        parts.join(" ")
    }

    /// Install `dependencies` in `cwd`
    ///
    /// Output of the package manager is captured, not forwarded. On failure
    /// the error carries [`Self::command_line`] for manual use.
    pub async fn install(
        &self,
        dependencies: &[RegistryDependency],
        cwd: &Path,
    ) -> Result<InstallOutcome, DependencyInstallError> {
        if dependencies.is_empty() {
            debug!("No dependencies to install");
            return Ok(InstallOutcome::Skipped);
        }

        let manual_command = self.command_line(dependencies);
        info!("Running `{}` in {}", manual_command, cwd.display());

        let output = Command::new(&self.program)
            .arg(ADD_SUBCOMMAND)
            .args(dependencies.iter().map(RegistryDependency::spec))
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| DependencyInstallError::Spawn {
                program: self.program.clone(),
                manual_command: manual_command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(DependencyInstallError::Failed {
                manual_command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(InstallOutcome::Installed)
    }
}

/// Install command for `dependencies` using the default package manager
pub fn generate_install_command(dependencies: &[RegistryDependency]) -> String {
    DependencyInstaller::default().command_line(dependencies)
}

/// Install `dependencies` in `cwd` using the default package manager
pub async fn install_dependencies(
    dependencies: &[RegistryDependency],
    cwd: &Path,
) -> Result<InstallOutcome, DependencyInstallError> {
    DependencyInstaller::default().install(dependencies, cwd).await
}
