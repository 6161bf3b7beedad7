//! notra-editor command line
//!
//! Shared by the `notra-editor` installer and the `build-registry`
//! producer binaries.

pub mod init_cli;
pub mod logging;
pub mod prompt;
