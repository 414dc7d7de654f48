#![allow(dead_code)]
//! Shared test setup.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the tracing subscriber once for the whole test binary.
pub fn setup_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt::init();
    });
}
