//! Canonical file paths for the local data directory.
//!
//! The data directory defaults to `./data` and can be relocated with
//! the `PARKWATCH_DATA_DIR` environment variable.

use std::path::PathBuf;

/// Returns the local data directory.
#[must_use]
pub fn data_dir() -> PathBuf {
    std::env::var_os("PARKWATCH_DATA_DIR")
        .map_or_else(|| PathBuf::from("data"), PathBuf::from)
}

/// Returns the path of the single key-value store file.
#[must_use]
pub fn store_path() -> PathBuf {
    data_dir().join("parkwatch-store.json")
}
