//! Authentication service.
//!
//! Orchestrates sign-in, registration, sign-out, and session restoration.
//! Credential resolution is delegated to the
//! [`IdentityDirectory`](crate::services::directory::IdentityDirectory);
//! this service owns the persisted session keys.
//!
//! The session state machine is `SignedOut` until either
//! [`restore_session`](AuthService::restore_session) finds a stored user
//! or a fresh [`sign_in`](AuthService::sign_in) succeeds.

mod error;

pub use error::AuthError;

use std::sync::Arc;

use tracing::{info, instrument, warn};

use furiameter_store::{KeyValueStore, StoreError};

use crate::db::RepositoryError;
use crate::models::session::{Session, keys};
use crate::models::user::{Credentials, RegisterData, User};
use crate::services::directory::IdentityDirectory;

/// Authentication service.
#[derive(Clone)]
pub struct AuthService {
    directory: IdentityDirectory,
    store: Arc<dyn KeyValueStore>,
}

impl AuthService {
    /// Create a new authentication service.
    pub fn new(directory: IdentityDirectory, store: Arc<dyn KeyValueStore>) -> Self {
        Self { directory, store }
    }

    /// Sign in with credentials and persist the resulting session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if no identity matches, or
    /// `AuthError::Repository` if the session cannot be persisted (in
    /// which case no session was established).
    #[instrument(skip_all, fields(email = %credentials.email))]
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let user = self.directory.resolve(credentials).await?;
        let session = Session::open(user);
        self.persist(&session).await?;
        info!(user = %session.user.id, role = %session.user.role, "signed in");
        Ok(session)
    }

    /// Register a new fan and sign them in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` or `AuthError::EmailInUse` from
    /// registration, or `AuthError::Repository` on storage failure.
    #[instrument(skip_all, fields(email = %data.email))]
    pub async fn register(&self, data: RegisterData) -> Result<Session, AuthError> {
        let user = self.directory.register(data).await?;
        let session = Session::open(user);
        self.persist(&session).await?;
        info!(user = %session.user.id, "registered and signed in");
        Ok(session)
    }

    /// Sign out, removing the persisted session.
    ///
    /// Best-effort cleanup: removal failures are logged and swallowed so
    /// the caller always ends up signed out.
    #[instrument(skip_all)]
    pub async fn sign_out(&self) {
        for key in [keys::SESSION_USER, keys::SESSION_TOKEN] {
            if let Err(err) = self.store.remove(key).await {
                warn!(key, error = %err, "failed to clear stored session value");
            }
        }
        info!("signed out");
    }

    /// Restore the persisted session at process start.
    ///
    /// Returns `Ok(None)` when no session is stored. A stored value that
    /// no longer parses is logged, discarded, and also treated as "no
    /// session" - a corrupt session must never crash startup.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` only for backend I/O failures.
    #[instrument(skip_all)]
    pub async fn restore_session(&self) -> Result<Option<User>, AuthError> {
        let raw = self
            .store
            .get(keys::SESSION_USER)
            .await
            .map_err(RepositoryError::from)?;
        let Some(raw) = raw else {
            return Ok(None);
        };

        match serde_json::from_str::<User>(&raw) {
            Ok(user) => {
                info!(user = %user.id, "session restored");
                Ok(Some(user))
            }
            Err(err) => {
                warn!(error = %err, "stored session is corrupt; discarding");
                self.sign_out().await;
                Ok(None)
            }
        }
    }

    async fn persist(&self, session: &Session) -> Result<(), AuthError> {
        let user = serde_json::to_string(&session.user)
            .map_err(|err| RepositoryError::from(StoreError::corrupt(keys::SESSION_USER, &err)))?;
        let token = serde_json::to_string(&session.token)
            .map_err(|err| RepositoryError::from(StoreError::corrupt(keys::SESSION_TOKEN, &err)))?;

        self.store
            .set(keys::SESSION_USER, &user)
            .await
            .map_err(RepositoryError::from)?;
        self.store
            .set(keys::SESSION_TOKEN, &token)
            .await
            .map_err(RepositoryError::from)?;
        Ok(())
    }
}
