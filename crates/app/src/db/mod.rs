//! Collection-backed repositories.
//!
//! # Storage keys
//!
//! - `registered_fans` - JSON array of fan [`User`](crate::models::User)s
//! - `interactions` - JSON array of [`Interaction`](crate::models::Interaction)s
//!
//! Keys are owned here and never leak to callers. Every mutation goes
//! through a [`JsonCollection`](furiameter_store::JsonCollection)
//! read-modify-write cycle; there is no partial update and no cross-key
//! transaction, so a failure mid-operation leaves the old value intact.

pub mod fans;
pub mod interactions;

use thiserror::Error;

use furiameter_core::StatusError;
use furiameter_store::StoreError;

pub use fans::FanRepository;
pub use interactions::InteractionRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying store failure (I/O or corrupt stored data).
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Requested record was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Illegal interaction status change.
    #[error("invalid status transition: {0}")]
    InvalidTransition(#[from] StatusError),
}
