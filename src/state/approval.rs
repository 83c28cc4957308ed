//! Approval console view state
//!
//! Applicants are fetched once per mount and after every status change.
//! The status filter only narrows the snapshot, it never queries the
//! backend.

use tracing::warn;
use crate::models::{Applicant, VerificationStatus};
use crate::services::ParticipantsApi;
use crate::state::detail::{DetailState, DetailView};
use crate::utils::errors::Result;
use crate::utils::logging::{log_api_error, log_console_action};

const CONSOLE: &str = "approvals";

pub struct ApprovalConsole {
    api: ParticipantsApi,
    applicants: Vec<Applicant>,
    filter: VerificationStatus,
    detail: DetailView<Applicant>,
}

impl ApprovalConsole {
    pub fn new(api: ParticipantsApi) -> Self {
        Self {
            api,
            applicants: Vec::new(),
            filter: VerificationStatus::default(),
            detail: DetailView::new(),
        }
    }

    pub async fn mount(&mut self) {
        self.refresh().await;
    }

    /// Replace the applicants snapshot; on failure the old one stays
    pub async fn refresh(&mut self) {
        match self.api.list_applicants().await {
            Ok(applicants) => self.applicants = applicants,
            Err(e) => log_api_error(CONSOLE, &e, "Error fetching applicants"),
        }
    }

    pub fn applicants(&self) -> &[Applicant] {
        &self.applicants
    }

    pub fn filter(&self) -> VerificationStatus {
        self.filter
    }

    pub fn set_filter(&mut self, status: VerificationStatus) {
        self.filter = status;
    }

    /// Applicants matching the active filter, in snapshot order
    pub fn visible(&self) -> Vec<&Applicant> {
        self.applicants
            .iter()
            .filter(|applicant| applicant.verification_status == self.filter)
            .collect()
    }

    pub fn count(&self, status: VerificationStatus) -> usize {
        self.applicants
            .iter()
            .filter(|applicant| applicant.verification_status == status)
            .count()
    }

    /// Open the detail view with a fresh fetch of the applicant
    pub async fn open_detail(&mut self, applicant_id: &str) {
        log_console_action(CONSOLE, "view_applicant", Some(applicant_id));
        let api = self.api.clone();
        let applicant_id = applicant_id.to_string();
        self.detail
            .open(async move {
                api.get_applicant(&applicant_id).await.map_err(|e| {
                    log_api_error(CONSOLE, &e, "Error fetching applicant");
                    e
                })
            })
            .await;
    }

    pub async fn close_detail(&mut self) {
        self.detail.close().await;
    }

    /// Wait for the detail fetch and return what the view shows
    pub async fn settle_detail(&mut self) -> DetailState<Applicant> {
        self.detail.wait().await;
        self.detail.state().await
    }

    pub async fn detail_state(&self) -> DetailState<Applicant> {
        self.detail.state().await
    }

    pub async fn approve(&mut self, applicant_id: &str) -> Result<()> {
        self.decide(applicant_id, VerificationStatus::Verified).await
    }

    pub async fn reject(&mut self, applicant_id: &str) -> Result<()> {
        self.decide(applicant_id, VerificationStatus::Rejected).await
    }

    /// Send the decision, then refetch the list and close the detail view.
    ///
    /// Already-decided applicants are not protected from a second decision;
    /// that case is only logged.
    async fn decide(&mut self, applicant_id: &str, status: VerificationStatus) -> Result<()> {
        if let Some(current) = self
            .applicants
            .iter()
            .find(|applicant| applicant.id == applicant_id)
            .map(|applicant| applicant.verification_status)
        {
            if current != VerificationStatus::Pending {
                warn!(
                    applicant_id = applicant_id,
                    current = %current,
                    requested = %status,
                    "Changing the decision on an applicant that was already decided"
                );
            }
        }

        log_console_action(CONSOLE, status.as_str(), Some(applicant_id));
        match self.api.update_status(applicant_id, status).await {
            Ok(()) => {
                self.refresh().await;
                self.detail.close().await;
                Ok(())
            }
            Err(e) => {
                log_api_error(CONSOLE, &e, "Error updating status");
                Err(e)
            }
        }
    }
}
