//! Assets-and-users API client
//!
//! Typed wrapper over the inventory backend: user and asset CRUD,
//! assignment, and CSV import/export.

use std::path::Path;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use tracing::{debug, info};
use crate::config::ApiConfig;
use crate::models::{
    Asset, AssignAssetRequest, Collection, CreateAssetRequest, CreateUserRequest,
    UpdateAssetRequest, User,
};
use crate::services::http::HttpBackend;
use crate::utils::errors::{AssetDeskError, Result};

#[derive(Debug, Clone)]
pub struct InventoryApi {
    http: HttpBackend,
}

impl InventoryApi {
    /// Create a new InventoryApi instance
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            http: HttpBackend::new("inventory", config)?,
        })
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.http.get_json("/users/").await
    }

    pub async fn get_user(&self, user_id: i64) -> Result<User> {
        self.http.get_json(&format!("/users/{}", user_id)).await
    }

    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<()> {
        debug!(email = %request.email, "Creating user");
        self.http.send_json(Method::POST, "/users/", request).await
    }

    pub async fn delete_user(&self, user_id: i64) -> Result<()> {
        self.http.send_empty(Method::DELETE, &format!("/users/{}", user_id)).await
    }

    /// Assets currently assigned to a user
    pub async fn user_assets(&self, user_id: i64) -> Result<Vec<Asset>> {
        self.http.get_json(&format!("/users/{}/assets", user_id)).await
    }

    pub async fn list_assets(&self) -> Result<Vec<Asset>> {
        self.http.get_json("/assets/").await
    }

    pub async fn get_asset(&self, asset_id: i64) -> Result<Asset> {
        self.http.get_json(&format!("/assets/{}", asset_id)).await
    }

    pub async fn create_asset(&self, request: &CreateAssetRequest) -> Result<()> {
        debug!(asset_tag = %request.asset_tag, "Creating asset");
        self.http.send_json(Method::POST, "/assets/", request).await
    }

    pub async fn update_asset(&self, asset_id: i64, request: &UpdateAssetRequest) -> Result<()> {
        self.http
            .send_json(Method::PUT, &format!("/assets/{}", asset_id), request)
            .await
    }

    pub async fn delete_asset(&self, asset_id: i64) -> Result<()> {
        self.http.send_empty(Method::DELETE, &format!("/assets/{}", asset_id)).await
    }

    pub async fn assign_asset(&self, request: &AssignAssetRequest) -> Result<()> {
        self.http.send_json(Method::POST, "/assets/assign", request).await
    }

    pub async fn unassign_asset(&self, asset_id: i64) -> Result<()> {
        self.http
            .send_empty(Method::POST, &format!("/assets/{}/unassign", asset_id))
            .await
    }

    /// Upload a CSV file to the collection's import endpoint
    pub async fn import_csv(&self, collection: Collection, file: &Path) -> Result<()> {
        let contents = tokio::fs::read(file).await?;
        let file_name = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                AssetDeskError::InvalidInput(format!("Not a file: {}", file.display()))
            })?;

        let part = Part::bytes(contents)
            .file_name(file_name)
            .mime_str("text/csv")
            .map_err(AssetDeskError::Http)?;
        let form = Form::new().part("file", part);

        info!(collection = collection.as_str(), file = %file.display(), "Uploading CSV import");
        self.http
            .upload(&format!("/import/{}/", collection.as_str()), form)
            .await
    }

    /// Where the browser would navigate to download the export
    pub fn export_url(&self, collection: Collection) -> String {
        self.http.url(&format!("/export/{}/", collection.as_str()))
    }

    /// Download the collection's CSV export into `dest`
    pub async fn export_csv(&self, collection: Collection, dest: &Path) -> Result<u64> {
        self.http
            .download(&format!("/export/{}/", collection.as_str()), dest)
            .await
    }
}
