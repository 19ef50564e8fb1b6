//! Authentication error types.

use thiserror::Error;

use furiameter_core::EmailError;

use crate::db::RepositoryError;
use crate::services::directory::DirectoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// No identity matches the given credentials.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Registration email already belongs to an identity.
    #[error("email already in use")]
    EmailInUse,

    /// Repository/storage error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<DirectoryError> for AuthError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::InvalidEmail(e) => Self::InvalidEmail(e),
            DirectoryError::InvalidCredentials => Self::InvalidCredentials,
            DirectoryError::EmailInUse => Self::EmailInUse,
            DirectoryError::Repository(e) => Self::Repository(e),
        }
    }
}
