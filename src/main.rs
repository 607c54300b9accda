//! shortgen
//!
//! Author short-video scripts, check their timing, and render them through
//! text-to-video backends.
//!
//! # Usage
//!
//! ```bash
//! shortgen template -o scripts/bill_of_rights.json
//! shortgen validate scripts/
//! shortgen generate scripts/bill_of_rights.json --per-section
//! shortgen clip --event declaration_of_independence --event suffrage_movement
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use shortgen_cli::adapters::init_tracing;
use shortgen_cli::cli::Cli;

/// Main entry point for the shortgen CLI application
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_format()?)?;
    debug!("Starting shortgen");

    cli.run().await
}
