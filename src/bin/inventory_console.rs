//! Inventory console
//!
//! Command-line front end for the assets-and-users service.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use clap::Parser;
use tracing::info;

use asset_desk::{
    config,
    handlers::{inventory, InventoryCommand},
    utils::logging,
    InventoryApi, InventoryConsole,
};

#[derive(Parser)]
#[command(name = "inventory-console")]
#[command(about = "Manage users and assets of the inventory service")]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the inventory API, overrides the configuration
    #[arg(long, global = true)]
    api_base_url: Option<String>,

    /// Log level
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: InventoryCommand,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    // Load configuration
    let mut settings = config::load(args.config.as_deref())?;
    if let Some(url) = args.api_base_url {
        settings.inventory.api_base_url = url;
    }
    if let Some(level) = args.log_level {
        settings.logging.level = level;
    }
    settings.validate()?;

    // Initialize logging
    let _guard = logging::init_logging(&settings.logging)?;
    info!(api = %settings.inventory.api_base_url, "Starting {}", asset_desk::info());

    let api = InventoryApi::new(&settings.inventory)?;
    let mut console = InventoryConsole::new(api);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = inventory::handle_command(&mut console, args.command, &mut out, confirm).await?;
    out.flush()?;

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Ask a yes/no question on the terminal; anything but yes declines
fn confirm(question: &str) -> bool {
    eprint!("{} [y/N] ", question);
    let _ = io::stderr().flush();

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
