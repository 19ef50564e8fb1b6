//! FURIAMeter Store - Local persistence layer.
//!
//! Every durable value in the app lives in a string key-value store:
//! single records (the persisted session) as one JSON object per key, and
//! whole domain collections (fans, interactions) as one JSON array per key.
//!
//! # Architecture
//!
//! - [`KeyValueStore`] - The async storage contract. Backends complete or
//!   fail each operation independently; there is no transaction spanning
//!   multiple keys.
//! - [`MemoryStore`] - `HashMap` backend for tests and ephemeral use.
//! - [`FileStore`] - One JSON file per key under a root directory, with
//!   atomic replacement on write.
//! - [`JsonCollection`] - Read-modify-write access to a JSON array stored
//!   under a single key. Every mutation reads the full collection, computes
//!   the next state, and writes the full collection back.

#![cfg_attr(not(test), forbid(unsafe_code))]

mod collection;
mod error;
mod file;
mod kv;
mod memory;

pub use collection::JsonCollection;
pub use error::StoreError;
pub use file::FileStore;
pub use kv::KeyValueStore;
pub use memory::MemoryStore;
