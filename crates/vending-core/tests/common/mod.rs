//! Shared helpers for integration tests.

#![allow(dead_code)]

use tracing_subscriber::EnvFilter;
use vending_core::VendingMachine;

pub const NUMBER_OF_SLOTS: usize = 9;

/// Installs a test-writer subscriber once per test binary.
///
/// `RUST_LOG=vending_core=debug cargo test -- --nocapture` shows the
/// register and stash events.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// A nine-slot machine with nothing in it.
pub fn empty_machine() -> VendingMachine<&'static str> {
    init_tracing();
    VendingMachine::new(NUMBER_OF_SLOTS).unwrap()
}
