//! Interaction repository.

use std::sync::Arc;

use tracing::debug;

use furiameter_core::{InteractionId, InteractionStatus, UserId};
use furiameter_store::{JsonCollection, KeyValueStore};

use super::RepositoryError;
use crate::models::interaction::{Interaction, InteractionDraft};
use crate::models::user::User;

/// Storage key for the interaction collection.
pub(crate) const INTERACTIONS: &str = "interactions";

/// Repository for fan-engagement interactions.
///
/// Interactions are append-only at creation. Afterwards only `status`
/// changes, through [`update_status`](Self::update_status), which enforces
/// the pending-to-terminal lifecycle.
#[derive(Debug, Clone)]
pub struct InteractionRepository {
    interactions: JsonCollection<Interaction>,
}

impl InteractionRepository {
    /// Create an interaction repository over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            interactions: JsonCollection::new(store, INTERACTIONS),
        }
    }

    /// All interactions, in creation order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the collection cannot be read.
    pub async fn list(&self) -> Result<Vec<Interaction>, RepositoryError> {
        Ok(self.interactions.read_all().await?)
    }

    /// Interactions recorded by `owner`.
    ///
    /// A read-side projection of [`list`](Self::list) - never writes.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the collection cannot be read.
    pub async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Interaction>, RepositoryError> {
        let all = self.interactions.read_all().await?;
        Ok(all.into_iter().filter(|i| &i.owner_id == owner).collect())
    }

    /// Record a new pending interaction owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the append fails; a failed
    /// append stores nothing.
    pub async fn record(
        &self,
        owner: &User,
        draft: InteractionDraft,
    ) -> Result<Interaction, RepositoryError> {
        let interaction = Interaction::record(owner, draft);
        self.interactions.append(interaction.clone()).await?;
        debug!(id = %interaction.id, owner = %interaction.owner_id, "interaction recorded");
        Ok(interaction)
    }

    /// Move the interaction with `id` to `next` status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no interaction has that ID,
    /// `RepositoryError::InvalidTransition` if the current status is
    /// terminal (nothing is written in either case), or
    /// `RepositoryError::Store` on storage failure.
    pub async fn update_status(
        &self,
        id: InteractionId,
        next: InteractionStatus,
    ) -> Result<Interaction, RepositoryError> {
        let updated = self
            .interactions
            .try_modify(|interactions| {
                let Some(stored) = interactions.iter_mut().find(|i| i.id == id) else {
                    return Err(RepositoryError::NotFound);
                };
                stored.status = stored.status.transition_to(next)?;
                Ok(stored.clone())
            })
            .await??;
        debug!(id = %updated.id, status = %updated.status, "interaction status updated");
        Ok(updated)
    }

    /// Remove the interaction with `id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no interaction has that ID,
    /// or `RepositoryError::Store` on storage failure.
    pub async fn delete(&self, id: InteractionId) -> Result<(), RepositoryError> {
        let removed = self.interactions.delete_where(|i| i.id == id).await?;
        if removed == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use furiameter_core::{Email, SocialLinks, UserRole};
    use furiameter_store::MemoryStore;

    use super::*;

    fn user(id: &str) -> User {
        User {
            id: UserId::new(id),
            name: format!("User {id}"),
            email: Email::parse(&format!("{id}@x.com")).unwrap(),
            role: UserRole::Fan,
            image: String::new(),
            social: SocialLinks::default(),
        }
    }

    fn draft(kind: &str) -> InteractionDraft {
        InteractionDraft::new(kind, NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(), 10)
    }

    fn repo() -> InteractionRepository {
        InteractionRepository::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_record_then_list_contains_it_once() {
        let repo = repo();
        let created = repo.record(&user("fan-1"), draft("quiz")).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all, vec![created]);
    }

    #[tokio::test]
    async fn test_list_for_owner_filters_without_mutating() {
        let repo = repo();
        repo.record(&user("fan-1"), draft("quiz")).await.unwrap();
        repo.record(&user("fan-2"), draft("stream")).await.unwrap();
        repo.record(&user("fan-1"), draft("chat")).await.unwrap();

        let mine = repo.list_for_owner(&UserId::new("fan-1")).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|i| i.owner_id == UserId::new("fan-1")));

        // The projection must leave the full collection untouched.
        assert_eq!(repo.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_confirm_pending_interaction() {
        let repo = repo();
        let created = repo.record(&user("fan-1"), draft("quiz")).await.unwrap();

        let updated = repo
            .update_status(created.id, InteractionStatus::Confirmed)
            .await
            .unwrap();

        assert_eq!(updated.status, InteractionStatus::Confirmed);
        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all.first().unwrap().status, InteractionStatus::Confirmed);
    }

    #[tokio::test]
    async fn test_terminal_status_rejects_further_updates() {
        let repo = repo();
        let created = repo.record(&user("fan-1"), draft("quiz")).await.unwrap();
        repo.update_status(created.id, InteractionStatus::Cancelled)
            .await
            .unwrap();

        let err = repo
            .update_status(created.id, InteractionStatus::Confirmed)
            .await
            .unwrap_err();

        assert!(matches!(err, RepositoryError::InvalidTransition(_)));
        // The rejected transition must not have written anything.
        assert_eq!(
            repo.list().await.unwrap().first().unwrap().status,
            InteractionStatus::Cancelled
        );
    }

    #[tokio::test]
    async fn test_update_status_unknown_id_is_not_found() {
        let err = repo()
            .update_status(InteractionId::generate(), InteractionStatus::Confirmed)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_keeps_other_records() {
        let repo = repo();
        let first = repo.record(&user("fan-1"), draft("quiz")).await.unwrap();
        let second = repo.record(&user("fan-1"), draft("chat")).await.unwrap();

        repo.delete(first.id).await.unwrap();

        assert_eq!(repo.list().await.unwrap(), vec![second]);
    }
}
