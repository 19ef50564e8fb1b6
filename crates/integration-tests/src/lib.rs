//! Shared helpers for FURIAMeter integration tests.
//!
//! Unlike unit tests, these drive whole flows through [`AppState`] the way
//! screens do: one service or repository call per user action, against a
//! fresh store per test. Everything runs in-process; no external setup is
//! required.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;
use std::sync::Arc;

use furiameter_app::{AppConfig, AppState};
use furiameter_store::{FileStore, KeyValueStore, MemoryStore};

/// Initialize tracing for a test binary. Safe to call repeatedly.
pub fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "furiameter=debug".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_test_writer()
        .try_init();
}

/// Fresh application state over an in-memory store.
#[must_use]
pub fn memory_state() -> AppState {
    init_tracing();
    AppState::with_store(AppConfig::new("unused"), Arc::new(MemoryStore::new()))
}

/// Fresh application state over a file store rooted at `dir`.
///
/// Reopening over the same directory simulates an app restart.
///
/// # Panics
///
/// Panics if the store cannot be opened; tests treat that as a failure.
#[allow(clippy::unwrap_used)]
pub async fn file_state(dir: &Path) -> AppState {
    init_tracing();
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(dir).await.unwrap());
    AppState::with_store(AppConfig::new(dir), store)
}
