//! The key-value storage contract.

use async_trait::async_trait;

use crate::error::StoreError;

/// Asynchronous string key-value storage.
///
/// This is the only shared mutable resource in the system. Backends are
/// expected to be durable (for the file backend) and read-your-writes
/// consistent within a process. Each operation completes or fails
/// independently - there is no atomicity across keys - and a failure means
/// no change was applied.
///
/// All mutation of domain data must go through a
/// [`JsonCollection`](crate::JsonCollection) rather than raw `set` calls;
/// direct key writes bypass the collection invariants.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Validate a storage key.
///
/// Keys double as file names in the file backend, so both backends enforce
/// the same restricted alphabet to keep behavior identical.
pub(crate) fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey {
            key: key.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_identifiers() {
        for key in ["interactions", "registered_fans", "session-user", "v1.key"] {
            assert!(validate_key(key).is_ok());
        }
    }

    #[test]
    fn test_rejects_empty_and_path_like_keys() {
        for key in ["", "a/b", "../escape", "a b", "käse", "a:b"] {
            assert!(matches!(
                validate_key(key),
                Err(StoreError::InvalidKey { .. })
            ));
        }
    }
}
