//! JSON collection storage over a single key.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::kv::KeyValueStore;

/// An ordered list of records stored as one JSON array under one key.
///
/// Every mutation follows the same read-modify-write cycle: read the full
/// collection, compute the next state, write the full collection back.
/// There is no partial or delta update.
///
/// Mutations through one handle (and its clones, which share the guard)
/// are serialized behind an async mutex, so two overlapping writes cannot
/// drop each other's records. Two *independently constructed* collections
/// bound to the same key still race with last-writer-wins semantics -
/// construct each collection once per process and clone it.
pub struct JsonCollection<T> {
    store: Arc<dyn KeyValueStore>,
    key: String,
    write_guard: Arc<Mutex<()>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for JsonCollection<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            key: self.key.clone(),
            write_guard: Arc::clone(&self.write_guard),
            _marker: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for JsonCollection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonCollection")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Bind a collection to `key` in `store`.
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            write_guard: Arc::new(Mutex::new(())),
            _marker: PhantomData,
        }
    }

    /// The storage key this collection is bound to.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the entire collection.
    ///
    /// A never-written key reads as an empty collection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] if the stored value is present but
    /// not a JSON array of records, or [`StoreError::Io`] on backend failure.
    pub async fn read_all(&self) -> Result<Vec<T>, StoreError> {
        self.load().await
    }

    /// Append one record to the collection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the read or the write-back fails; a failed
    /// append applies no change.
    pub async fn append(&self, record: T) -> Result<(), StoreError> {
        let _guard = self.write_guard.lock().await;
        let mut items = self.load().await?;
        items.push(record);
        self.save(&items).await
    }

    /// Replace every record matching `matches` with `update(record)`.
    ///
    /// Returns the number of records updated. The write-back happens even
    /// when nothing matched (an idempotent no-op overwrite).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the read or the write-back fails.
    pub async fn update_where<P, F>(&self, matches: P, mut update: F) -> Result<usize, StoreError>
    where
        P: Fn(&T) -> bool,
        F: FnMut(T) -> T,
    {
        let _guard = self.write_guard.lock().await;
        let items = self.load().await?;
        let mut updated = 0;
        let items: Vec<T> = items
            .into_iter()
            .map(|item| {
                if matches(&item) {
                    updated += 1;
                    update(item)
                } else {
                    item
                }
            })
            .collect();
        self.save(&items).await?;
        Ok(updated)
    }

    /// Remove every record matching `matches` and write back the remainder.
    ///
    /// Returns the number of records removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the read or the write-back fails.
    pub async fn delete_where<P>(&self, matches: P) -> Result<usize, StoreError>
    where
        P: Fn(&T) -> bool,
    {
        let _guard = self.write_guard.lock().await;
        let mut items = self.load().await?;
        let before = items.len();
        items.retain(|item| !matches(item));
        let removed = before - items.len();
        self.save(&items).await?;
        Ok(removed)
    }

    /// Run a fallible read-modify-write cycle.
    ///
    /// `apply` receives the current records and may edit them in place. On
    /// `Ok` the edited collection is written back; on `Err` nothing is
    /// written and the rejection is handed back to the caller. Used for
    /// mutations that validate against current state, like status
    /// transitions.
    ///
    /// # Errors
    ///
    /// The outer `Result` carries storage failures; the inner one is
    /// `apply`'s own verdict.
    pub async fn try_modify<R, E, F>(&self, apply: F) -> Result<Result<R, E>, StoreError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, E>,
    {
        let _guard = self.write_guard.lock().await;
        let mut items = self.load().await?;
        match apply(&mut items) {
            Ok(value) => {
                self.save(&items).await?;
                Ok(Ok(value))
            }
            Err(err) => Ok(Err(err)),
        }
    }

    async fn load(&self) -> Result<Vec<T>, StoreError> {
        match self.store.get(&self.key).await? {
            None => Ok(Vec::new()),
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|err| StoreError::corrupt(&self.key, &err))
            }
        }
    }

    async fn save(&self, items: &[T]) -> Result<(), StoreError> {
        let raw =
            serde_json::to_string(items).map_err(|err| StoreError::corrupt(&self.key, &err))?;
        self.store.set(&self.key, &raw).await
    }
}
