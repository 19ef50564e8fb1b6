//! Profile editing service.
//!
//! Fans edit their own name, email, and social links; the admin edits fan
//! records from the management screen. Both paths land here because an
//! edit touches up to two keys: the fan collection, and - when the edited
//! fan is the signed-in user - the persisted session user. The two writes
//! are not atomic (the store has no cross-key transactions); the fan
//! collection is written first, so a failure in between leaves a stale
//! session user that corrects itself on the next sign-in.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, instrument};

use furiameter_core::{Email, EmailError, SocialLinks, UserId};
use furiameter_store::KeyValueStore;

use crate::db::{FanRepository, RepositoryError};
use crate::models::session::keys;
use crate::models::user::User;
use crate::services::directory::IdentityDirectory;

/// Errors that can occur while editing a profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The new email already belongs to another identity.
    #[error("email already in use")]
    EmailInUse,

    /// No registered fan has the given ID.
    #[error("fan not found")]
    NotFound,

    /// Repository/storage error.
    #[error("repository error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ProfileError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound,
            RepositoryError::Conflict(_) => Self::EmailInUse,
            other => Self::Repository(other),
        }
    }
}

/// Requested profile changes; `None` fields are left as they are.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New email address, validated and uniqueness-checked.
    pub email: Option<String>,
    /// Replacement social links.
    pub social: Option<SocialLinks>,
}

/// Profile editing service.
#[derive(Clone)]
pub struct ProfileService {
    directory: IdentityDirectory,
    fans: FanRepository,
    store: Arc<dyn KeyValueStore>,
}

impl ProfileService {
    /// Create a new profile service.
    pub fn new(
        directory: IdentityDirectory,
        fans: FanRepository,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            directory,
            fans,
            store,
        }
    }

    /// Apply `update` to the fan with `id`.
    ///
    /// Only registered fans are editable; the admin and staff roster are
    /// fixed, and asking to edit them is a `NotFound`. If the edited fan
    /// is the signed-in user, the persisted session user is refreshed so
    /// the change survives a restart.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NotFound` if no fan has that ID,
    /// `ProfileError::InvalidEmail`/`ProfileError::EmailInUse` for a bad
    /// new address, or `ProfileError::Repository` on storage failure.
    #[instrument(skip_all, fields(fan = %id))]
    pub async fn update_profile(
        &self,
        id: &UserId,
        update: ProfileUpdate,
    ) -> Result<User, ProfileError> {
        let mut fan = self.fans.find_by_id(id).await?.ok_or(ProfileError::NotFound)?;

        if let Some(name) = update.name {
            fan.name = name;
        }
        if let Some(email) = update.email {
            let email = Email::parse(&email)?;
            if self.directory.email_in_use(email.as_str(), Some(id)).await? {
                return Err(ProfileError::EmailInUse);
            }
            fan.email = email;
        }
        if let Some(social) = update.social {
            fan.social = social;
        }

        let updated = self.fans.update(&fan).await?;
        self.refresh_session_user(&updated).await?;
        debug!(fan = %updated.id, "profile updated");
        Ok(updated)
    }

    /// Replace the fan's linked social accounts.
    ///
    /// # Errors
    ///
    /// Same as [`update_profile`](Self::update_profile).
    pub async fn update_social(
        &self,
        id: &UserId,
        social: SocialLinks,
    ) -> Result<User, ProfileError> {
        self.update_profile(
            id,
            ProfileUpdate {
                social: Some(social),
                ..ProfileUpdate::default()
            },
        )
        .await
    }

    /// Rewrite the persisted session user if it is the fan just edited.
    async fn refresh_session_user(&self, fan: &User) -> Result<(), ProfileError> {
        let raw = self
            .store
            .get(keys::SESSION_USER)
            .await
            .map_err(|err| ProfileError::Repository(err.into()))?;
        let Some(raw) = raw else {
            return Ok(());
        };
        // A corrupt stored session is the auth layer's concern, not an
        // edit failure.
        let Ok(current) = serde_json::from_str::<User>(&raw) else {
            return Ok(());
        };
        if current.id != fan.id {
            return Ok(());
        }

        let json = serde_json::to_string(fan)
            .map_err(|err| ProfileError::Repository(RepositoryError::Store(
                furiameter_store::StoreError::corrupt(keys::SESSION_USER, &err),
            )))?;
        self.store
            .set(keys::SESSION_USER, &json)
            .await
            .map_err(|err| ProfileError::Repository(err.into()))?;
        Ok(())
    }
}
