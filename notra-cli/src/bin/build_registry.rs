//! build-registry - produce `public/r/editor.json` from `packages/editor`
//!
//! Run from the repository root.

use anyhow::{Context, Result};
use clap::Parser;

use notra_cli::logging::{initialize_tracing, LogLevel};
use notra_core::registry::build_registry;
use notra_core::BuildConfig;

#[derive(Parser, Debug)]
#[clap(
    name = "build-registry",
    about = "Build the notra-editor registry document from the editor package",
    version
)]
struct Cli {
    /// Set log level
    #[clap(long, default_value = "info")]
    log_level: LogLevel,
}

fn main() {
    let cli = Cli::parse();
    initialize_tracing(cli.log_level);

    if let Err(e) = run() {
        eprintln!("✗ Build failed: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let root = std::env::current_dir().context("Cannot determine current directory")?;
    let config = BuildConfig::for_repository(&root);

    println!("Building registry...");
    println!("  Source: {}", config.source_dir.display());
    println!("  Output: {}", config.output_path().display());

    let output = build_registry(&config)?;

    println!(
        "✓ Registry built successfully: {}",
        output.output_path.display()
    );
    println!("  Files: {}", output.file_count);
    println!("  Dependencies: {}", output.dependency_count);
    println!("  Digest: {}", output.digest);

    Ok(())
}
