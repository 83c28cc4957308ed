//! AssetDesk
//!
//! Terminal clients for two independent REST backends: an asset inventory
//! service (users, assets, assignment, CSV import/export) and a participant
//! approval service (applicant review). This library provides the typed
//! HTTP clients, the view state of each console, and the command handlers
//! the two binaries are built from.

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{AssetDeskError, Result};

// Re-export main components for easy access
pub use services::{InventoryApi, ParticipantsApi};
pub use state::{ApprovalConsole, InventoryConsole};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
