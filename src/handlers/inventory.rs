//! Inventory console command handlers
//!
//! Each command mounts the console (fetching users and assets), performs
//! one action, and prints the re-fetched view.

use std::io::Write;
use std::path::PathBuf;
use clap::Subcommand;
use crate::handlers::{render, report_client_error, Outcome};
use crate::models::{AssetStatus, Collection};
use crate::state::{DetailState, InventoryConsole, Notice, Tab};
use crate::utils::errors::Result;

#[derive(Subcommand, Debug, Clone)]
pub enum InventoryCommand {
    /// Manage users
    #[command(subcommand)]
    Users(UserCommand),
    /// Manage assets
    #[command(subcommand)]
    Assets(AssetCommand),
}

#[derive(Subcommand, Debug, Clone)]
pub enum UserCommand {
    /// List users with their asset counts
    List,
    /// Add a new user
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        department: String,
    },
    /// Delete a user; their assets become available again
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Show the assets assigned to a user
    Assets { id: i64 },
    /// Import users from a CSV file
    Import { file: PathBuf },
    /// Download all users as CSV
    Export { dest: PathBuf },
}

#[derive(Subcommand, Debug, Clone)]
pub enum AssetCommand {
    /// List assets
    List,
    /// Show one asset as currently stored
    Show { id: i64 },
    /// Add a new asset
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        asset_tag: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        serial_number: String,
        /// Purchase date as YYYY-MM-DD
        #[arg(long)]
        purchase_date: String,
    },
    /// Edit an asset; the tag and purchase date cannot be changed
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        serial_number: Option<String>,
        /// available, assigned or maintenance
        #[arg(long)]
        status: Option<String>,
    },
    /// Delete an asset
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Assign an available asset to a user
    Assign { asset_id: i64, user_id: i64 },
    /// Return an asset to the pool
    Unassign { asset_id: i64 },
    /// Import assets from a CSV file
    Import { file: PathBuf },
    /// Download all assets as CSV
    Export { dest: PathBuf },
}

/// Run one inventory command against a console.
///
/// `confirm` is asked before destructive deletes that were not pre-confirmed.
pub async fn handle_command<W, C>(
    console: &mut InventoryConsole,
    command: InventoryCommand,
    out: &mut W,
    confirm: C,
) -> Result<Outcome>
where
    W: Write,
    C: FnMut(&str) -> bool,
{
    console.mount().await;

    match command {
        InventoryCommand::Users(command) => {
            console.set_tab(Tab::Users);
            handle_user_command(console, command, out, confirm).await
        }
        InventoryCommand::Assets(command) => {
            console.set_tab(Tab::Assets);
            handle_asset_command(console, command, out, confirm).await
        }
    }
}

async fn handle_user_command<W, C>(
    console: &mut InventoryConsole,
    command: UserCommand,
    out: &mut W,
    mut confirm: C,
) -> Result<Outcome>
where
    W: Write,
    C: FnMut(&str) -> bool,
{
    let outcome = match command {
        UserCommand::List => Outcome::Completed,
        UserCommand::Create { name, email, department } => {
            console.open_create_user();
            if let Some(form) = console.user_form_mut() {
                form.name = name;
                form.email = email;
                form.department = department;
            }
            match console.submit().await {
                Ok(()) => Outcome::Completed,
                Err(e) => return report_client_error(out, e),
            }
        }
        UserCommand::Delete { id, yes } => {
            if !yes && !confirm("Are you sure you want to delete this user?") {
                return Ok(Outcome::Cancelled);
            }
            match console.delete_user(id).await {
                Ok(()) => Outcome::Completed,
                Err(e) => return report_client_error(out, e),
            }
        }
        UserCommand::Assets { id } => {
            console.open_user_assets(id).await;
            let state = console.settle_user_assets().await;
            console.close_user_assets().await;
            return match state {
                DetailState::Loaded(view) => {
                    write!(out, "{}", render::user_assets_view(&view))?;
                    Ok(Outcome::Completed)
                }
                _ => Ok(Outcome::Failed),
            };
        }
        UserCommand::Import { file } => {
            let notice = console.import(Collection::Users, &file).await;
            return write_notice(out, notice);
        }
        UserCommand::Export { dest } => {
            let target = console.export_target();
            return export(console, target, dest, out).await;
        }
    };

    let users = console.users();
    write!(out, "{}", render::users_table(users, |id| console.assigned_count(id)))?;
    Ok(outcome)
}

async fn handle_asset_command<W, C>(
    console: &mut InventoryConsole,
    command: AssetCommand,
    out: &mut W,
    mut confirm: C,
) -> Result<Outcome>
where
    W: Write,
    C: FnMut(&str) -> bool,
{
    let outcome = match command {
        AssetCommand::List => Outcome::Completed,
        AssetCommand::Show { id } => {
            return match console.fetch_asset(id).await {
                Ok(asset) => {
                    write!(out, "{}", render::asset_detail(&asset))?;
                    Ok(Outcome::Completed)
                }
                Err(e) => report_client_error(out, e),
            };
        }
        AssetCommand::Create {
            name,
            asset_tag,
            category,
            description,
            serial_number,
            purchase_date,
        } => {
            console.open_create_asset();
            if let Some(form) = console.asset_form_mut() {
                form.name = name;
                form.asset_tag = asset_tag;
                form.category = category;
                form.description = description;
                form.serial_number = serial_number;
                form.purchase_date = purchase_date;
            }
            match console.submit().await {
                Ok(()) => Outcome::Completed,
                Err(e) => return report_client_error(out, e),
            }
        }
        AssetCommand::Edit {
            id,
            name,
            category,
            description,
            serial_number,
            status,
        } => {
            let status = match status.map(|s| s.parse::<AssetStatus>()).transpose() {
                Ok(status) => status,
                Err(e) => return report_client_error(out, e),
            };
            if let Err(e) = console.open_edit_asset(id) {
                return report_client_error(out, e);
            }
            if let Some(form) = console.edit_form_mut() {
                if let Some(name) = name {
                    form.name = name;
                }
                if let Some(category) = category {
                    form.category = category;
                }
                if let Some(description) = description {
                    form.description = description;
                }
                if let Some(serial_number) = serial_number {
                    form.serial_number = serial_number;
                }
                if let Some(status) = status {
                    form.status = status;
                }
            }
            match console.submit().await {
                Ok(()) => Outcome::Completed,
                Err(e) => return report_client_error(out, e),
            }
        }
        AssetCommand::Delete { id, yes } => {
            if !yes && !confirm("Are you sure you want to delete this asset?") {
                return Ok(Outcome::Cancelled);
            }
            match console.delete_asset(id).await {
                Ok(()) => Outcome::Completed,
                Err(e) => return report_client_error(out, e),
            }
        }
        AssetCommand::Assign { asset_id, user_id } => {
            if let Err(e) = console.open_assign(asset_id) {
                return report_client_error(out, e);
            }
            match console.assign_to(user_id).await {
                Ok(()) => Outcome::Completed,
                Err(e) => return report_client_error(out, e),
            }
        }
        AssetCommand::Unassign { asset_id } => match console.unassign(asset_id).await {
            Ok(()) => Outcome::Completed,
            Err(e) => return report_client_error(out, e),
        },
        AssetCommand::Import { file } => {
            let notice = console.import(Collection::Assets, &file).await;
            return write_notice(out, notice);
        }
        AssetCommand::Export { dest } => {
            let target = console.export_target();
            return export(console, target, dest, out).await;
        }
    };

    write!(out, "{}", render::assets_table(console.assets()))?;
    Ok(outcome)
}

fn write_notice<W: Write>(out: &mut W, notice: Notice) -> Result<Outcome> {
    writeln!(out, "{}", notice.message())?;
    Ok(if notice.is_success() {
        Outcome::Completed
    } else {
        Outcome::Failed
    })
}

async fn export<W: Write>(
    console: &InventoryConsole,
    collection: Collection,
    dest: PathBuf,
    out: &mut W,
) -> Result<Outcome> {
    writeln!(out, "Downloading {}", console.export_url(collection))?;
    match console.export(collection, &dest).await {
        Ok(bytes) => {
            writeln!(out, "Saved {} bytes to {}", bytes, dest.display())?;
            Ok(Outcome::Completed)
        }
        Err(_) => Ok(Outcome::Failed),
    }
}
