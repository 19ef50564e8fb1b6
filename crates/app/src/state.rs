//! Application state shared across screens.

use std::sync::Arc;

use furiameter_store::{FileStore, KeyValueStore, StoreError};

use crate::config::AppConfig;
use crate::db::{FanRepository, InteractionRepository};
use crate::services::auth::AuthService;
use crate::services::directory::IdentityDirectory;
use crate::services::profile::ProfileService;

/// Application state shared across all screens.
///
/// Constructed once per process and cheaply cloneable via `Arc`. Owning
/// the repositories here (rather than constructing them per call) is what
/// gives each collection a single write guard for its whole lifetime -
/// and keeps "one directory per running app" true without module-level
/// globals.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    store: Arc<dyn KeyValueStore>,
    fans: FanRepository,
    interactions: InteractionRepository,
    directory: IdentityDirectory,
    auth: AuthService,
    profile: ProfileService,
}

impl AppState {
    /// Open file-backed application state rooted at the configured data
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the data directory cannot be created.
    pub async fn open(config: AppConfig) -> Result<Self, StoreError> {
        let store: Arc<dyn KeyValueStore> =
            Arc::new(FileStore::open(config.data_dir.clone()).await?);
        Ok(Self::with_store(config, store))
    }

    /// Build application state over an explicit store (used by tests with
    /// an in-memory backend).
    #[must_use]
    pub fn with_store(config: AppConfig, store: Arc<dyn KeyValueStore>) -> Self {
        let fans = FanRepository::new(Arc::clone(&store));
        let interactions = InteractionRepository::new(Arc::clone(&store));
        let directory = IdentityDirectory::new(fans.clone());
        let auth = AuthService::new(directory.clone(), Arc::clone(&store));
        let profile = ProfileService::new(directory.clone(), fans.clone(), Arc::clone(&store));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                fans,
                interactions,
                directory,
                auth,
                profile,
            }),
        }
    }

    /// Get a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the underlying key-value store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.inner.store
    }

    /// Get a reference to the fan repository.
    #[must_use]
    pub fn fans(&self) -> &FanRepository {
        &self.inner.fans
    }

    /// Get a reference to the interaction repository.
    #[must_use]
    pub fn interactions(&self) -> &InteractionRepository {
        &self.inner.interactions
    }

    /// Get a reference to the identity directory.
    #[must_use]
    pub fn directory(&self) -> &IdentityDirectory {
        &self.inner.directory
    }

    /// Get a reference to the authentication service.
    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }

    /// Get a reference to the profile service.
    #[must_use]
    pub fn profile(&self) -> &ProfileService {
        &self.inner.profile
    }
}
