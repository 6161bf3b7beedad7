//! Installation steps (consumer side)
//!
//! Each step is a plain function over an explicit base directory so the
//! `init` command can run them in order and decide how to react to each
//! outcome:
//!
//! 1. [`validate_project`] - the directory has a package.json
//! 2. [`detect_conflicts`] - would anything be overwritten?
//! 3. [`copy_files`] - write registry files under the target directory
//! 4. [`install_dependencies`] - run the package manager

mod conflict;
mod copier;
mod dependencies;
mod validator;

pub use conflict::{detect_conflicts, ConflictReport};
pub use copier::{copy_files, CopyReport};
pub use dependencies::{
    generate_install_command, install_dependencies, DependencyInstaller, InstallOutcome,
};
pub use validator::validate_project;
