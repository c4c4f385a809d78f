//! zbot CLI binary.
//!
//! Maintenance access to the bot database:
//! - Check connectivity
//! - Read and write bot metadata
//! - Preview account anniversaries
//! - Inspect pending lotteries and polls

use clap::Parser;
use zbot::cli::{Cli, handle_command};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load .env before reading MONGODB_* variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    zbot::init_tracing(cli.verbose)?;

    handle_command(cli.command).await?;

    Ok(())
}
