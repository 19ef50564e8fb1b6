//! Fan repository.
//!
//! The registered-fan set is the mutable slice of the identity directory:
//! created by registration, editable (name, email, social links), and
//! deletable by the admin. Deleting a fan does not touch that fan's
//! interactions - orphaned records are tolerated by design.

use std::sync::Arc;

use furiameter_core::UserId;
use furiameter_store::{JsonCollection, KeyValueStore};

use super::RepositoryError;
use crate::models::user::User;

/// Storage key for the registered-fan collection.
pub(crate) const REGISTERED_FANS: &str = "registered_fans";

/// Repository for registered fans.
#[derive(Debug, Clone)]
pub struct FanRepository {
    fans: JsonCollection<User>,
}

impl FanRepository {
    /// Create a fan repository over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            fans: JsonCollection::new(store, REGISTERED_FANS),
        }
    }

    /// All registered fans, in registration order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the collection cannot be read.
    pub async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.fans.read_all().await?)
    }

    /// Look up a fan by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the collection cannot be read.
    pub async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let fans = self.fans.read_all().await?;
        Ok(fans.into_iter().find(|f| &f.id == id))
    }

    /// Look up a fan by exact email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the collection cannot be read.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let fans = self.fans.read_all().await?;
        Ok(fans.into_iter().find(|f| f.email.as_str() == email))
    }

    /// Append a new fan.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a fan with the same ID or
    /// email already exists (the collection-level analog of a unique
    /// constraint), or `RepositoryError::Store` on storage failure.
    pub async fn create(&self, fan: User) -> Result<User, RepositoryError> {
        let created = self
            .fans
            .try_modify(|fans| {
                if fans.iter().any(|f| f.id == fan.id || f.email == fan.email) {
                    return Err(RepositoryError::Conflict(format!(
                        "fan {} already exists",
                        fan.id
                    )));
                }
                fans.push(fan.clone());
                Ok(fan)
            })
            .await??;
        Ok(created)
    }

    /// Replace the stored record for `fan.id` with `fan`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no fan has that ID,
    /// `RepositoryError::Conflict` if the new email collides with another
    /// fan, or `RepositoryError::Store` on storage failure.
    pub async fn update(&self, fan: &User) -> Result<User, RepositoryError> {
        let updated = self
            .fans
            .try_modify(|fans| {
                if fans.iter().any(|f| f.id != fan.id && f.email == fan.email) {
                    return Err(RepositoryError::Conflict(format!(
                        "email {} already in use",
                        fan.email
                    )));
                }
                let Some(stored) = fans.iter_mut().find(|f| f.id == fan.id) else {
                    return Err(RepositoryError::NotFound);
                };
                *stored = fan.clone();
                Ok(fan.clone())
            })
            .await??;
        Ok(updated)
    }

    /// Remove the fan with `id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no fan has that ID, or
    /// `RepositoryError::Store` on storage failure.
    pub async fn delete(&self, id: &UserId) -> Result<(), RepositoryError> {
        let removed = self.fans.delete_where(|f| &f.id == id).await?;
        if removed == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
