//! Approval console command handlers

use std::io::Write;
use clap::Subcommand;
use crate::handlers::{render, report_client_error, Outcome};
use crate::models::VerificationStatus;
use crate::state::{ApprovalConsole, DetailState};
use crate::utils::errors::Result;

#[derive(Subcommand, Debug, Clone)]
pub enum ApprovalCommand {
    /// List applicants with the given verification status
    List {
        #[arg(long, default_value = "pending")]
        status: VerificationStatus,
    },
    /// Show an applicant's full profile
    Show { id: String },
    /// Mark an applicant as verified
    Approve { id: String },
    /// Mark an applicant as rejected
    Reject { id: String },
}

/// Run one approval command against a console
pub async fn handle_command<W: Write>(
    console: &mut ApprovalConsole,
    command: ApprovalCommand,
    out: &mut W,
) -> Result<Outcome> {
    console.mount().await;

    match command {
        ApprovalCommand::List { status } => {
            console.set_filter(status);
            write_list(console, out)?;
            Ok(Outcome::Completed)
        }
        ApprovalCommand::Show { id } => {
            console.open_detail(&id).await;
            let state = console.settle_detail().await;
            console.close_detail().await;
            match state {
                DetailState::Loaded(applicant) => {
                    write!(out, "{}", render::applicant_detail(&applicant))?;
                    Ok(Outcome::Completed)
                }
                _ => Ok(Outcome::Failed),
            }
        }
        ApprovalCommand::Approve { id } => {
            decide(console, &id, VerificationStatus::Verified, out).await
        }
        ApprovalCommand::Reject { id } => {
            decide(console, &id, VerificationStatus::Rejected, out).await
        }
    }
}

async fn decide<W: Write>(
    console: &mut ApprovalConsole,
    id: &str,
    status: VerificationStatus,
    out: &mut W,
) -> Result<Outcome> {
    let result = match status {
        VerificationStatus::Verified => console.approve(id).await,
        VerificationStatus::Rejected => console.reject(id).await,
        VerificationStatus::Pending => return Ok(Outcome::Failed),
    };
    if let Err(e) = result {
        return report_client_error(out, e);
    }

    // Show the list the decided applicant now belongs to
    console.set_filter(status);
    write_list(console, out)?;
    Ok(Outcome::Completed)
}

fn write_list<W: Write>(console: &ApprovalConsole, out: &mut W) -> Result<()> {
    let counts: Vec<String> = VerificationStatus::ALL
        .iter()
        .map(|status| {
            let marker = if *status == console.filter() { "*" } else { "" };
            format!("{}{} ({})", marker, status.as_str().to_uppercase(), console.count(*status))
        })
        .collect();
    writeln!(out, "{}\n", counts.join("  "))?;
    write!(out, "{}", render::applicants_table(&console.visible()))?;
    Ok(())
}
