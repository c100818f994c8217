#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Local single-user identity record.
//!
//! Tracks the chosen nickname and cumulative report count behind the
//! `parkwatch-identity` storage key. The trust tier is derived from the
//! count (see [`parkwatch_models::TrustLevel`]), never stored.

use parkwatch_models::Identity;
use parkwatch_storage::{IDENTITY_KEY, KeyValueStorage, StorageError};

/// Errors from identity operations.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The persistence collaborator failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// The identity record could not be serialized.
    #[error("failed to serialize identity: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Restores the identity record, or `None` if one was never set.
///
/// A corrupt persisted record is logged and treated as "never set".
///
/// # Errors
///
/// Returns [`IdentityError::Storage`] if the store cannot be read.
pub fn load_identity(storage: &dyn KeyValueStorage) -> Result<Option<Identity>, IdentityError> {
    let Some(raw) = storage.get(IDENTITY_KEY)? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(identity) => Ok(Some(identity)),
        Err(e) => {
            log::warn!("persisted identity is corrupt ({e}); treating as never set");
            Ok(None)
        }
    }
}

/// Stores a nickname, preserving the existing report count.
///
/// The name is trimmed; a whitespace-only name is stored as
/// `"Anonymous"`. Length limiting is a presentation-layer concern and
/// is not re-validated here. Persists immediately and returns the
/// updated record.
///
/// # Errors
///
/// Returns [`IdentityError`] if the record cannot be read or written.
pub fn set_nickname(
    storage: &mut dyn KeyValueStorage,
    name: &str,
) -> Result<Identity, IdentityError> {
    let trimmed = name.trim();
    let nickname = if trimmed.is_empty() {
        "Anonymous".to_string()
    } else {
        trimmed.to_string()
    };

    let report_count = load_identity(storage)?.map_or(0, |id| id.report_count);
    let updated = Identity {
        nickname,
        report_count,
    };

    save(storage, &updated)?;
    Ok(updated)
}

/// Increments the report count by exactly one, creating the record with
/// an `"Anonymous"` nickname if none exists. Persists and returns the
/// updated record.
///
/// # Errors
///
/// Returns [`IdentityError`] if the record cannot be read or written.
pub fn increment_report_count(
    storage: &mut dyn KeyValueStorage,
) -> Result<Identity, IdentityError> {
    let current = load_identity(storage)?;
    let updated = Identity {
        nickname: current
            .as_ref()
            .map_or_else(|| "Anonymous".to_string(), |id| id.nickname.clone()),
        report_count: current.map_or(0, |id| id.report_count) + 1,
    };

    save(storage, &updated)?;
    Ok(updated)
}

fn save(storage: &mut dyn KeyValueStorage, identity: &Identity) -> Result<(), IdentityError> {
    let json = serde_json::to_string(identity)?;
    storage.set(IDENTITY_KEY, &json)?;
    Ok(())
}
