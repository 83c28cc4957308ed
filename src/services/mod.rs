//! Services module
//!
//! HTTP clients for the two backends. Each console talks to exactly one.

pub mod http;
pub mod inventory;
pub mod participants;

pub use http::HttpBackend;
pub use inventory::InventoryApi;
pub use participants::ParticipantsApi;
