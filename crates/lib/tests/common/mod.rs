#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Shared setup for the integration tests.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the tracing subscriber for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt::init();
    });
}
