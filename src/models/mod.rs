//! Data models module
//!
//! This module contains the records exchanged with both backends and the
//! forms the consoles fill in before a write.

pub mod user;
pub mod asset;
pub mod applicant;

// Re-export commonly used models
pub use user::{User, CreateUserRequest, UserForm};
pub use asset::{Asset, AssetStatus, AssetForm, AssetEditForm, CreateAssetRequest, UpdateAssetRequest, AssignAssetRequest};
pub use applicant::{Applicant, FieldValue, VerificationStatus, UpdateApplicantStatusRequest};

/// Which collection an import or export targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Users,
    Assets,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Assets => "assets",
        }
    }

    /// Capitalized plural used in notices
    pub fn title(&self) -> &'static str {
        match self {
            Collection::Users => "Users",
            Collection::Assets => "Assets",
        }
    }
}
