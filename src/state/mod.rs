//! View state for the two consoles
//!
//! The inventory and approval consoles are independent; the only piece
//! they share is the cancellable detail sub-view.

pub mod approval;
pub mod detail;
pub mod inventory;

pub use approval::ApprovalConsole;
pub use detail::{DetailState, DetailView};
pub use inventory::{InventoryConsole, Modal, Notice, Tab, UserAssetsView};
