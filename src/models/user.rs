//! User model

use std::sync::OnceLock;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use crate::utils::errors::{AssetDeskError, Result};
use crate::utils::helpers::optional_timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub department: String,
    #[serde(default, with = "optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub department: String,
}

/// The "Add New User" form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub department: String,
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Same shape an `<input type="email">` accepts
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*$")
            .expect("email pattern is valid")
    })
}

impl UserForm {
    /// Required-field checks, nothing beyond what the form itself enforces
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AssetDeskError::InvalidInput("Name is required".to_string()));
        }
        if self.email.trim().is_empty() {
            return Err(AssetDeskError::InvalidInput("Email is required".to_string()));
        }
        if !email_pattern().is_match(self.email.trim()) {
            return Err(AssetDeskError::InvalidInput(format!(
                "Email is not a valid address: {}",
                self.email
            )));
        }
        if self.department.trim().is_empty() {
            return Err(AssetDeskError::InvalidInput("Department is required".to_string()));
        }
        Ok(())
    }

    pub fn to_request(&self) -> CreateUserRequest {
        CreateUserRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            department: self.department.clone(),
        }
    }
}
