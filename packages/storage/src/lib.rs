#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Key-value string persistence for the parkwatch client.
//!
//! Models the single local store the app writes through: synchronous
//! get/set over namespaced string keys, durable across restarts,
//! last-writer-wins. [`FileStorage`] keeps the whole store in one JSON
//! object file; [`MemoryStorage`] backs tests.

mod file;
mod memory;
pub mod paths;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Storage key for the persisted report collection.
pub const REPORTS_KEY: &str = "parking-reports";

/// Storage key for the persisted proximity settings.
pub const SETTINGS_KEY: &str = "proximity-settings";

/// Storage key for the persisted identity record.
pub const IDENTITY_KEY: &str = "parkwatch-identity";

/// Errors from storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Filesystem read or write failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The on-disk store could not be serialized.
    #[error("storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Synchronous string key-value storage.
///
/// A missing key is `Ok(None)`, never an error; each component maps
/// that to its own default. Values are opaque strings (JSON documents
/// in practice).
pub trait KeyValueStorage {
    /// Returns the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the underlying store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write fails. On failure the
    /// previous durable state is retained (no partial-write recovery is
    /// attempted beyond that).
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}
