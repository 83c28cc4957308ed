//! Participants API client used by the approval console

use reqwest::Method;
use crate::config::ApiConfig;
use crate::models::{Applicant, UpdateApplicantStatusRequest, VerificationStatus};
use crate::services::http::HttpBackend;
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct ParticipantsApi {
    http: HttpBackend,
}

impl ParticipantsApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            http: HttpBackend::new("participants", config)?,
        })
    }

    pub async fn list_applicants(&self) -> Result<Vec<Applicant>> {
        self.http.get_json("/api/participants").await
    }

    pub async fn get_applicant(&self, applicant_id: &str) -> Result<Applicant> {
        self.http
            .get_json(&format!("/api/participants/{}", urlencoding::encode(applicant_id)))
            .await
    }

    /// PUT carrying only the new verification status
    pub async fn update_status(&self, applicant_id: &str, status: VerificationStatus) -> Result<()> {
        let body = UpdateApplicantStatusRequest {
            verification_status: status,
        };
        self.http
            .send_json(
                Method::PUT,
                &format!("/api/participants/{}", urlencoding::encode(applicant_id)),
                &body,
            )
            .await
    }
}
