//! Storage error types.

use thiserror::Error;

/// Errors that can occur during storage operations.
///
/// A failed operation applies no change: callers may retry at their own
/// discretion, and every collection mutation is a full-value overwrite, so
/// a retry is always safe.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failure from the backend.
    #[error("store i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value exists but cannot be decoded.
    #[error("corrupt data under key {key:?}: {reason}")]
    Corrupt {
        /// The storage key holding the bad value.
        key: String,
        /// Decoder error message.
        reason: String,
    },

    /// The key is not usable by this backend.
    #[error("invalid storage key {key:?}")]
    InvalidKey {
        /// The rejected key.
        key: String,
    },
}

impl StoreError {
    /// Build a [`StoreError::Corrupt`] from a serde failure on `key`.
    #[must_use]
    pub fn corrupt(key: &str, err: &serde_json::Error) -> Self {
        Self::Corrupt {
            key: key.to_owned(),
            reason: err.to_string(),
        }
    }
}
