//! Test helpers module
//!
//! In-memory fakes of the inventory and participants backends served by
//! wiremock, harnesses wiring them to the consoles, and record fixtures.

#![allow(dead_code)]

pub mod backend_mock;
pub mod test_data;

pub use backend_mock::*;
pub use test_data::*;

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize test logging once per test binary
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("asset_desk=debug")
            .with_test_writer()
            .try_init();
    });
}
