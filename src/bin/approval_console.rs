//! Approval console
//!
//! Command-line front end for reviewing participant applications.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use clap::Parser;
use tracing::info;

use asset_desk::{
    config,
    handlers::{approvals, ApprovalCommand},
    utils::logging,
    ApprovalConsole, ParticipantsApi,
};

#[derive(Parser)]
#[command(name = "approval-console")]
#[command(about = "Review applicants and record verification decisions")]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the participants API, overrides the configuration
    #[arg(long, global = true)]
    api_base_url: Option<String>,

    /// Log level
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: ApprovalCommand,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let mut settings = config::load(args.config.as_deref())?;
    if let Some(url) = args.api_base_url {
        settings.approvals.api_base_url = url;
    }
    if let Some(level) = args.log_level {
        settings.logging.level = level;
    }
    settings.validate()?;

    let _guard = logging::init_logging(&settings.logging)?;
    info!(api = %settings.approvals.api_base_url, "Starting {}", asset_desk::info());

    let api = ParticipantsApi::new(&settings.approvals)?;
    let mut console = ApprovalConsole::new(api);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = approvals::handle_command(&mut console, args.command, &mut out).await?;
    out.flush()?;

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
