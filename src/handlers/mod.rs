//! Console command handlers
//!
//! This module maps command-line actions onto the console state machines:
//! - Inventory handlers for users, assets, assignment and CSV flows
//! - Approval handlers for the applicant list, detail and decisions
//! - Text rendering shared by both front ends

pub mod approvals;
pub mod inventory;
pub mod render;

use std::io::Write;
use crate::utils::errors::{AssetDeskError, FailureKind, Result};

pub use approvals::ApprovalCommand;
pub use inventory::{AssetCommand, InventoryCommand, UserCommand};

/// How a single console action ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Failed,
    /// The user declined a confirmation prompt
    Cancelled,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::Failed)
    }
}

/// Report a failed action.
///
/// Problems caught before any request (missing fields, actions not offered
/// for an asset's status) are shown like form feedback. Backend failures
/// were already logged by the console and get no further output.
pub(crate) fn report_client_error<W: Write>(out: &mut W, error: AssetDeskError) -> Result<Outcome> {
    if error.failure_kind() == FailureKind::Client {
        writeln!(out, "{}", error)?;
    }
    Ok(Outcome::Failed)
}
