//! Asset model

use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::models::user::User;
use crate::utils::errors::{AssetDeskError, Result};
use crate::utils::helpers::{date_input_to_iso, format_date, optional_timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: i64,
    pub name: String,
    pub asset_tag: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub serial_number: String,
    #[serde(default, with = "optional_timestamp")]
    pub purchase_date: Option<DateTime<Utc>>,
    pub status: AssetStatus,
    #[serde(default)]
    pub assigned_user_id: Option<i64>,
    #[serde(default, with = "optional_timestamp")]
    pub assigned_at: Option<DateTime<Utc>>,
    #[serde(default, with = "optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assigned_user: Option<User>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    Available,
    Assigned,
    Maintenance,
    /// Anything else the backend stored, e.g. through a CSV import
    #[serde(other)]
    Unknown,
}

impl AssetStatus {
    /// Values offered by the status selector of the edit form
    pub const SELECTABLE: [AssetStatus; 3] =
        [AssetStatus::Available, AssetStatus::Assigned, AssetStatus::Maintenance];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::Available => "available",
            AssetStatus::Assigned => "assigned",
            AssetStatus::Maintenance => "maintenance",
            AssetStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetStatus {
    type Err = AssetDeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(AssetStatus::Available),
            "assigned" => Ok(AssetStatus::Assigned),
            "maintenance" => Ok(AssetStatus::Maintenance),
            other => Err(AssetDeskError::InvalidInput(format!(
                "Unknown asset status: {}. Expected one of available, assigned, maintenance",
                other
            ))),
        }
    }
}

impl Asset {
    /// Assignment can only be started from an available asset
    pub fn can_assign(&self) -> bool {
        self.status == AssetStatus::Available
    }

    /// Every non-available asset offers unassign instead
    pub fn can_unassign(&self) -> bool {
        self.status != AssetStatus::Available
    }

    /// `assigned` status and an assigned user always go together
    pub fn assignment_consistent(&self) -> bool {
        (self.status == AssetStatus::Assigned) == self.assigned_user.is_some()
    }

    pub fn assignee_name(&self) -> &str {
        self.assigned_user
            .as_ref()
            .map(|user| user.name.as_str())
            .unwrap_or("Unassigned")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAssetRequest {
    pub name: String,
    pub asset_tag: String,
    pub category: String,
    pub description: String,
    pub serial_number: String,
    pub purchase_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateAssetRequest {
    pub name: String,
    pub category: String,
    pub description: String,
    pub serial_number: String,
    pub status: AssetStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignAssetRequest {
    pub asset_id: i64,
    pub user_id: i64,
}

/// The "Add New Asset" form; `purchase_date` holds a date-only input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetForm {
    pub name: String,
    pub asset_tag: String,
    pub category: String,
    pub description: String,
    pub serial_number: String,
    pub purchase_date: String,
}

impl AssetForm {
    pub fn validate(&self) -> Result<()> {
        require("Name", &self.name)?;
        require("Asset tag", &self.asset_tag)?;
        require("Category", &self.category)?;
        require("Description", &self.description)?;
        require("Serial number", &self.serial_number)?;
        require("Purchase date", &self.purchase_date)
    }

    pub fn to_request(&self) -> CreateAssetRequest {
        CreateAssetRequest {
            name: self.name.clone(),
            asset_tag: self.asset_tag.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            serial_number: self.serial_number.clone(),
            purchase_date: date_input_to_iso(&self.purchase_date),
        }
    }
}

/// The "Edit Asset" form: no asset tag, no purchase date, plus a status selector
#[derive(Debug, Clone, PartialEq)]
pub struct AssetEditForm {
    pub name: String,
    pub category: String,
    pub description: String,
    pub serial_number: String,
    pub status: AssetStatus,
    /// Shown read-only next to the form
    pub asset_tag: String,
    pub purchase_date: Option<String>,
}

impl AssetEditForm {
    pub fn from_asset(asset: &Asset) -> Self {
        Self {
            name: asset.name.clone(),
            category: asset.category.clone(),
            description: asset.description.clone(),
            serial_number: asset.serial_number.clone(),
            status: asset.status,
            asset_tag: asset.asset_tag.clone(),
            purchase_date: asset.purchase_date.map(format_date),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require("Name", &self.name)?;
        require("Category", &self.category)?;
        require("Description", &self.description)?;
        require("Serial number", &self.serial_number)?;
        if !AssetStatus::SELECTABLE.contains(&self.status) {
            return Err(AssetDeskError::InvalidInput(
                "Status must be one of available, assigned, maintenance".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_request(&self) -> UpdateAssetRequest {
        UpdateAssetRequest {
            name: self.name.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            serial_number: self.serial_number.clone(),
            status: self.status,
        }
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AssetDeskError::InvalidInput(format!("{} is required", field)));
    }
    Ok(())
}
