//! `notra-editor init` - copy the editor into the current project
//!
//! Runs the install steps strictly in order. Every step except the
//! dependency install is a hard gate; the conflict check is the only
//! branch point.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use notra_core::error::{CopyError, FetchError, ValidationError};
use notra_core::install::{
    copy_files, detect_conflicts, validate_project, DependencyInstaller, InstallOutcome,
};
use notra_core::registry::RegistryClient;
use notra_core::InstallConfig;

use crate::prompt::{ConfirmPrompt, TerminalPrompt};

/// Options from the command line
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Overwrite existing files without asking
    pub force: bool,
    /// Project root the command operates on
    pub cwd: PathBuf,
}

/// How a run that did not fail ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// Files were copied
    Installed {
        copied_files: Vec<String>,
        dependencies: DependencyStatus,
    },
    /// The user declined to overwrite; nothing was touched
    Cancelled,
}

/// Result of the (non-fatal) dependency step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyStatus {
    /// The registry declares no dependencies
    NoneDeclared,
    Installed,
    /// Installation failed; the user has to run `manual_command`
    Failed { manual_command: String },
}

/// Failures that end `init` with exit code 1
#[derive(Error, Debug)]
pub enum InitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Directory \"{target}\" already exists. Use --force to overwrite.")]
    ConflictRequiresForce { target: String },

    #[error("Failed to inspect \"{target}\": {source}")]
    ConflictScan {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read confirmation: {0}")]
    Prompt(#[source] std::io::Error),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("{source} ({copied} file(s) were written before the failure and remain on disk)")]
    Copy {
        copied: usize,
        #[source]
        source: CopyError,
    },
}

impl InitError {
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// Run `init`, printing progress to stdout
pub async fn run_init(
    options: &InitOptions,
    config: &InstallConfig,
    prompt: &dyn ConfirmPrompt,
) -> Result<InitOutcome, InitError> {
    let target = config.target_display();

    // Step 1: project validation
    validate_project(&options.cwd)?;
    debug!("Project root validated: {}", options.cwd.display());

    // Step 2: conflict detection
    let conflicts = detect_conflicts(&config.target_dir, &options.cwd).map_err(|source| {
        InitError::ConflictScan {
            target: target.clone(),
            source,
        }
    })?;

    if conflicts.has_conflict {
        debug!(
            "{} existing file(s) in {}: {:?}",
            conflicts.existing_files.len(),
            target,
            conflicts.existing_files
        );

        if options.force {
            println!("Overwriting existing files in {target}...");
        } else if !prompt.is_interactive() {
            return Err(InitError::ConflictRequiresForce { target });
        } else {
            let confirmed = prompt
                .confirm_overwrite(&target)
                .await
                .map_err(InitError::Prompt)?;

            if !confirmed {
                println!("Operation cancelled. No files were modified.");
                return Ok(InitOutcome::Cancelled);
            }
        }
    }

    // Step 3: fetch the registry
    let url = config.registry_url();
    println!("Fetching editor registry...");
    let client = RegistryClient::new(config.fetch_timeout)?;
    let registry = client.fetch(&url).await?;
    println!("Registry fetched successfully");
    info!(
        "Fetched {} v{} from {}",
        registry.name, registry.version, url
    );

    // Step 4: copy files
    println!("Copying editor files...");
    let report = copy_files(&registry.files, &config.target_dir, &options.cwd);
    if let Some(source) = report.error {
        return Err(InitError::Copy {
            copied: report.copied_files.len(),
            source,
        });
    }
    println!("Copied {} files to {}", report.copied_files.len(), target);

    // Step 5: dependencies (failure is only a warning)
    let dependencies = install_dependencies(&registry.dependencies, config, &options.cwd).await;

    // Step 6: done
    print_success(&target);

    Ok(InitOutcome::Installed {
        copied_files: report.copied_files,
        dependencies,
    })
}

/// Entry point for `notra-editor init`; returns the process exit code
pub async fn execute(options: InitOptions) -> i32 {
    let config = InstallConfig::from_env();
    debug!("Install config: {:?}", config);

    match run_init(&options, &config, &TerminalPrompt).await {
        Ok(_) => 0,
        Err(e) => {
            error!("init failed: {:?}", e);
            eprintln!("Error: {e}");
            e.exit_code()
        }
    }
}

async fn install_dependencies(
    dependencies: &[notra_core::RegistryDependency],
    config: &InstallConfig,
    cwd: &Path,
) -> DependencyStatus {
    if dependencies.is_empty() {
        return DependencyStatus::NoneDeclared;
    }

    println!("Installing dependencies...");
    let installer = DependencyInstaller::new(config.package_manager.clone());

    match installer.install(dependencies, cwd).await {
        Ok(InstallOutcome::Installed) => {
            println!("Dependencies installed successfully");
            DependencyStatus::Installed
        }
        Ok(InstallOutcome::Skipped) => DependencyStatus::NoneDeclared,
        Err(e) => {
            warn!("{}", e);
            println!("Failed to install dependencies automatically");
            println!("Please run the following command manually:");
            println!("  {}", e.manual_command());
            DependencyStatus::Failed {
                manual_command: e.manual_command().to_string(),
            }
        }
    }
}

fn print_success(target: &str) {
    println!();
    println!("✨ notra-editor initialized successfully!");
    println!();
    println!("Editor files have been copied to: {target}");
    println!("You can now import the editor in your project:");
    println!("  import {{ Editor }} from '@/{target}/editor';");
}
