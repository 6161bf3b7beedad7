//! notra-editor - scaffold the notra editor into a project
//!
//! Fetches the published registry document and copies its files into
//! `components/notra-editor/`, then installs the npm dependencies it lists.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use notra_cli::init_cli::{self, InitOptions};
use notra_cli::logging::{initialize_tracing, LogLevel};

#[derive(Parser, Debug)]
#[clap(
    name = "notra-editor",
    about = "CLI tool to scaffold notra-editor into your project",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Set log level
    #[clap(long, default_value = "warn", global = true)]
    log_level: LogLevel,

    /// Run as if started in this directory
    #[clap(long, global = true)]
    cwd: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize notra-editor in your project
    Init {
        /// Overwrite existing files without prompting
        #[clap(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    initialize_tracing(cli.log_level);

    let cwd = match cli.cwd {
        Some(dir) => dir,
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("Error: cannot determine current directory: {e}");
                std::process::exit(1);
            }
        },
    };
    debug!("Working directory: {}", cwd.display());

    let code = match cli.command {
        Command::Init { force } => init_cli::execute(InitOptions { force, cwd }).await,
    };

    // A declined prompt may leave a blocking stdin read behind; exit directly
    std::process::exit(code);
}
