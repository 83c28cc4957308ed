//! Inventory console view state
//!
//! Holds the users and assets snapshots, the open modal and its form, and
//! the user-assets sub-view. Every write is a single request followed by a
//! re-fetch of the affected collection(s); snapshots are never patched
//! locally.

use std::path::Path;
use tracing::{error, info, warn};
use crate::models::{
    Asset, AssetEditForm, AssetForm, AssignAssetRequest, Collection, User, UserForm,
};
use crate::services::InventoryApi;
use crate::state::detail::{DetailState, DetailView};
use crate::utils::errors::{AssetDeskError, Result};
use crate::utils::logging::{log_api_error, log_console_action};

const CONSOLE: &str = "inventory";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Assets,
    Users,
}

/// The modal dialog currently open over the lists
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    CreateUser(UserForm),
    CreateAsset(AssetForm),
    EditAsset { asset_id: i64, form: AssetEditForm },
    Assign { asset_id: i64 },
}

/// Blocking message shown after an import
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(message) | Notice::Failure(message) => message,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Notice::Success(_))
    }
}

/// Assets assigned to one user, as shown by the user-assets sub-view
#[derive(Debug, Clone, PartialEq)]
pub struct UserAssetsView {
    pub user_id: i64,
    pub user_name: Option<String>,
    pub assets: Vec<Asset>,
}

impl UserAssetsView {
    pub fn title(&self) -> String {
        match &self.user_name {
            Some(name) if !name.is_empty() => format!("Assets assigned to {}", name),
            _ => format!("Assets assigned to User #{}", self.user_id),
        }
    }
}

pub struct InventoryConsole {
    api: InventoryApi,
    users: Vec<User>,
    assets: Vec<Asset>,
    tab: Tab,
    modal: Option<Modal>,
    submitting: bool,
    importing: bool,
    user_assets: DetailView<UserAssetsView>,
}

impl InventoryConsole {
    pub fn new(api: InventoryApi) -> Self {
        Self {
            api,
            users: Vec::new(),
            assets: Vec::new(),
            tab: Tab::default(),
            modal: None,
            submitting: false,
            importing: false,
            user_assets: DetailView::new(),
        }
    }

    /// Initial load of both collections
    pub async fn mount(&mut self) {
        self.refresh_users().await;
        self.refresh_assets().await;
    }

    /// Replace the users snapshot; on failure the old snapshot stays
    pub async fn refresh_users(&mut self) {
        match self.api.list_users().await {
            Ok(users) => self.users = users,
            Err(e) => log_api_error(CONSOLE, &e, "Error fetching users"),
        }
    }

    /// Replace the assets snapshot; on failure the old snapshot stays
    pub async fn refresh_assets(&mut self) {
        match self.api.list_assets().await {
            Ok(assets) => {
                for asset in assets.iter().filter(|asset| !asset.assignment_consistent()) {
                    warn!(
                        asset_id = asset.id,
                        status = %asset.status,
                        has_assignee = asset.assigned_user.is_some(),
                        "Asset status disagrees with its assignment"
                    );
                }
                self.assets = assets;
            }
            Err(e) => log_api_error(CONSOLE, &e, "Error fetching assets"),
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn asset(&self, asset_id: i64) -> Option<&Asset> {
        self.assets.iter().find(|asset| asset.id == asset_id)
    }

    /// Fresh fetch of a single asset, independent of the snapshot
    pub async fn fetch_asset(&self, asset_id: i64) -> Result<Asset> {
        self.api.get_asset(asset_id).await.map_err(|e| {
            log_api_error(CONSOLE, &e, "Error fetching asset");
            e
        })
    }

    /// Number of assets in the snapshot assigned to a user
    pub fn assigned_count(&self, user_id: i64) -> usize {
        self.assets
            .iter()
            .filter(|asset| asset.assigned_user_id == Some(user_id))
            .count()
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    /// The export offered for the active tab
    pub fn export_target(&self) -> Collection {
        match self.tab {
            Tab::Assets => Collection::Assets,
            Tab::Users => Collection::Users,
        }
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    /// The submit control is disabled while a create/update is pending
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// The file input is disabled while an import is uploading
    pub fn is_importing(&self) -> bool {
        self.importing
    }

    pub fn open_create_user(&mut self) {
        self.modal = Some(Modal::CreateUser(UserForm::default()));
    }

    pub fn open_create_asset(&mut self) {
        self.modal = Some(Modal::CreateAsset(AssetForm::default()));
    }

    /// Open the edit form prefilled from the snapshot row
    pub fn open_edit_asset(&mut self, asset_id: i64) -> Result<()> {
        let asset = self
            .asset(asset_id)
            .ok_or_else(|| AssetDeskError::NotFound(format!("asset {}", asset_id)))?;
        let form = AssetEditForm::from_asset(asset);
        self.modal = Some(Modal::EditAsset { asset_id, form });
        Ok(())
    }

    /// Start assigning an asset; only available assets can be assigned
    pub fn open_assign(&mut self, asset_id: i64) -> Result<()> {
        let asset = self
            .asset(asset_id)
            .ok_or_else(|| AssetDeskError::NotFound(format!("asset {}", asset_id)))?;
        if !asset.can_assign() {
            return Err(AssetDeskError::InvalidStateTransition {
                from: asset.status.to_string(),
                to: "assigned".to_string(),
            });
        }
        self.modal = Some(Modal::Assign { asset_id });
        Ok(())
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    pub fn user_form_mut(&mut self) -> Option<&mut UserForm> {
        match self.modal.as_mut() {
            Some(Modal::CreateUser(form)) => Some(form),
            _ => None,
        }
    }

    pub fn asset_form_mut(&mut self) -> Option<&mut AssetForm> {
        match self.modal.as_mut() {
            Some(Modal::CreateAsset(form)) => Some(form),
            _ => None,
        }
    }

    pub fn edit_form_mut(&mut self) -> Option<&mut AssetEditForm> {
        match self.modal.as_mut() {
            Some(Modal::EditAsset { form, .. }) => Some(form),
            _ => None,
        }
    }

    /// Submit the open create/edit form.
    ///
    /// On success the collection is re-fetched and the modal closes. On
    /// failure the modal stays open with its form intact and the error is
    /// only logged.
    pub async fn submit(&mut self) -> Result<()> {
        let modal = self
            .modal
            .clone()
            .ok_or_else(|| AssetDeskError::InvalidInput("No form is open".to_string()))?;

        match modal {
            Modal::CreateUser(form) => {
                form.validate()?;
                log_console_action(CONSOLE, "create_user", Some(&form.email));
                let request = form.to_request();
                self.submitting = true;
                let outcome = self.api.create_user(&request).await;
                self.submitting = false;
                self.finish_write(outcome, "Error creating user", Collection::Users).await
            }
            Modal::CreateAsset(form) => {
                form.validate()?;
                log_console_action(CONSOLE, "create_asset", Some(&form.asset_tag));
                let request = form.to_request();
                self.submitting = true;
                let outcome = self.api.create_asset(&request).await;
                self.submitting = false;
                self.finish_write(outcome, "Error creating asset", Collection::Assets).await
            }
            Modal::EditAsset { asset_id, form } => {
                form.validate()?;
                log_console_action(CONSOLE, "update_asset", Some(&asset_id.to_string()));
                let request = form.to_request();
                self.submitting = true;
                let outcome = self.api.update_asset(asset_id, &request).await;
                self.submitting = false;
                self.finish_write(outcome, "Error updating asset", Collection::Assets).await
            }
            Modal::Assign { .. } => Err(AssetDeskError::InvalidInput(
                "Select a user to assign the asset to".to_string(),
            )),
        }
    }

    /// Assign the asset selected by [`open_assign`](Self::open_assign) to a user
    pub async fn assign_to(&mut self, user_id: i64) -> Result<()> {
        let asset_id = match self.modal {
            Some(Modal::Assign { asset_id }) => asset_id,
            _ => {
                return Err(AssetDeskError::InvalidInput(
                    "No asset is selected for assignment".to_string(),
                ))
            }
        };

        log_console_action(CONSOLE, "assign_asset", Some(&format!("{} -> {}", asset_id, user_id)));
        let request = AssignAssetRequest { asset_id, user_id };
        let outcome = self.api.assign_asset(&request).await;
        self.finish_write(outcome, "Error assigning asset", Collection::Assets).await
    }

    /// Unassign an asset; offered for every asset that is not available
    pub async fn unassign(&mut self, asset_id: i64) -> Result<()> {
        let asset = self
            .asset(asset_id)
            .ok_or_else(|| AssetDeskError::NotFound(format!("asset {}", asset_id)))?;
        if !asset.can_unassign() {
            return Err(AssetDeskError::InvalidStateTransition {
                from: asset.status.to_string(),
                to: "available".to_string(),
            });
        }

        log_console_action(CONSOLE, "unassign_asset", Some(&asset_id.to_string()));
        match self.api.unassign_asset(asset_id).await {
            Ok(()) => {
                self.refresh_assets().await;
                Ok(())
            }
            Err(e) => {
                log_api_error(CONSOLE, &e, "Error unassigning asset");
                Err(e)
            }
        }
    }

    /// Delete a user, then re-fetch users and assets since the backend
    /// unassigns the user's assets as part of the delete
    pub async fn delete_user(&mut self, user_id: i64) -> Result<()> {
        log_console_action(CONSOLE, "delete_user", Some(&user_id.to_string()));
        match self.api.delete_user(user_id).await {
            Ok(()) => {
                self.refresh_users().await;
                self.refresh_assets().await;
                Ok(())
            }
            Err(e) => {
                log_api_error(CONSOLE, &e, "Error deleting user");
                Err(e)
            }
        }
    }

    pub async fn delete_asset(&mut self, asset_id: i64) -> Result<()> {
        log_console_action(CONSOLE, "delete_asset", Some(&asset_id.to_string()));
        match self.api.delete_asset(asset_id).await {
            Ok(()) => {
                self.refresh_assets().await;
                Ok(())
            }
            Err(e) => {
                log_api_error(CONSOLE, &e, "Error deleting asset");
                Err(e)
            }
        }
    }

    /// Upload a CSV file. The whole import either succeeds or fails as far
    /// as the console is concerned; every failure maps to the same notice.
    pub async fn import(&mut self, collection: Collection, file: &Path) -> Notice {
        log_console_action(CONSOLE, "import", Some(collection.as_str()));
        self.importing = true;
        let outcome = self.api.import_csv(collection, file).await;
        self.importing = false;

        match outcome {
            Ok(()) => {
                match collection {
                    Collection::Users => self.refresh_users().await,
                    Collection::Assets => self.refresh_assets().await,
                }
                info!(collection = collection.as_str(), "CSV import accepted");
                Notice::Success(format!("{} imported successfully!", collection.title()))
            }
            Err(e) => {
                error!(collection = collection.as_str(), error = %e, "CSV import failed");
                Notice::Failure(format!("Failed to import {}.", collection.as_str()))
            }
        }
    }

    pub fn export_url(&self, collection: Collection) -> String {
        self.api.export_url(collection)
    }

    /// Download the export of a collection to a local file
    pub async fn export(&self, collection: Collection, dest: &Path) -> Result<u64> {
        log_console_action(CONSOLE, "export", Some(collection.as_str()));
        self.api.export_csv(collection, dest).await.map_err(|e| {
            log_api_error(CONSOLE, &e, "Error exporting CSV");
            e
        })
    }

    /// Open the user-assets sub-view with a fresh round trip
    pub async fn open_user_assets(&mut self, user_id: i64) {
        log_console_action(CONSOLE, "view_user_assets", Some(&user_id.to_string()));
        let api = self.api.clone();
        self.user_assets
            .open(async move {
                let (assets, user) =
                    futures::future::join(api.user_assets(user_id), api.get_user(user_id)).await;
                let assets = assets.unwrap_or_else(|e| {
                    log_api_error(CONSOLE, &e, "Error fetching user assets");
                    Vec::new()
                });
                let user_name = user.ok().map(|user| user.name);
                Ok(UserAssetsView {
                    user_id,
                    user_name,
                    assets,
                })
            })
            .await;
    }

    pub async fn close_user_assets(&mut self) {
        self.user_assets.close().await;
    }

    /// Wait for the user-assets fetch and return what the sub-view shows
    pub async fn settle_user_assets(&mut self) -> DetailState<UserAssetsView> {
        self.user_assets.wait().await;
        self.user_assets.state().await
    }

    pub async fn user_assets_state(&self) -> DetailState<UserAssetsView> {
        self.user_assets.state().await
    }

    async fn finish_write(&mut self, outcome: Result<()>, context: &str, refetch: Collection) -> Result<()> {
        match outcome {
            Ok(()) => {
                match refetch {
                    Collection::Users => self.refresh_users().await,
                    Collection::Assets => self.refresh_assets().await,
                }
                self.modal = None;
                Ok(())
            }
            Err(e) => {
                log_api_error(CONSOLE, &e, context);
                Err(e)
            }
        }
    }
}
