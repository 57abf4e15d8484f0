//! Development tasks for the loadout workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod dirs;

use anyhow::Result;
use clap::Parser;
use commands::{InspectSave, ValidateContent};

/// Development tasks for the loadout workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for the loadout engine", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Load and cross-check a content directory
    ValidateContent(ValidateContent),

    /// Read a save file and show every character's equipment
    InspectSave(InspectSave),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for LOADOUT_DATA_DIR and other env vars)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::ValidateContent(cmd) => cmd.execute(),
        Command::InspectSave(cmd) => cmd.execute(),
    }
}
