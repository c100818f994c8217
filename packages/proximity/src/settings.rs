//! Persistence for the proximity settings record.
//!
//! Absent or corrupt persisted settings fall back to the default
//! `{enabled: false, carLocation: null, radiusMiles: 0.5}`; an
//! out-of-range radius is clamped on load rather than rejected.

use parkwatch_models::ProximitySettings;
use parkwatch_storage::{KeyValueStorage, SETTINGS_KEY, StorageError};

/// Errors from settings persistence.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The persistence collaborator failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// The settings record could not be serialized.
    #[error("failed to serialize proximity settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Loads the proximity settings, falling back to defaults when absent
/// or corrupt.
///
/// # Errors
///
/// Returns [`SettingsError::Storage`] if the store cannot be read.
pub fn load_settings(storage: &dyn KeyValueStorage) -> Result<ProximitySettings, SettingsError> {
    let Some(raw) = storage.get(SETTINGS_KEY)? else {
        return Ok(ProximitySettings::default());
    };

    match serde_json::from_str::<ProximitySettings>(&raw) {
        Ok(settings) => Ok(settings.clamped()),
        Err(e) => {
            log::warn!("persisted proximity settings are corrupt ({e}); using defaults");
            Ok(ProximitySettings::default())
        }
    }
}

/// Persists the proximity settings, clamping the radius first.
///
/// # Errors
///
/// Returns [`SettingsError`] if the record cannot be written.
pub fn save_settings(
    storage: &mut dyn KeyValueStorage,
    settings: &ProximitySettings,
) -> Result<(), SettingsError> {
    let clamped = settings.clone().clamped();
    let json = serde_json::to_string(&clamped)?;
    storage.set(SETTINGS_KEY, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkwatch_models::LatLng;
    use parkwatch_storage::MemoryStorage;

    #[test]
    fn missing_settings_default() {
        let storage = MemoryStorage::new();
        let settings = load_settings(&storage).unwrap();
        assert_eq!(settings, ProximitySettings::default());
    }

    #[test]
    fn corrupt_settings_default() {
        let storage = MemoryStorage::with_entry(SETTINGS_KEY, "]]");
        let settings = load_settings(&storage).unwrap();
        assert_eq!(settings, ProximitySettings::default());
    }

    #[test]
    fn round_trips_car_location() {
        let mut storage = MemoryStorage::new();
        let settings = ProximitySettings {
            enabled: true,
            car_location: Some(LatLng::new(40.7128, -74.006)),
            radius_miles: 0.75,
        };

        save_settings(&mut storage, &settings).unwrap();
        let loaded = load_settings(&storage).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn out_of_range_radius_clamped_on_load() {
        let storage = MemoryStorage::with_entry(
            SETTINGS_KEY,
            r#"{"enabled":true,"carLocation":null,"radiusMiles":3.0}"#,
        );
        let settings = load_settings(&storage).unwrap();
        assert!((settings.radius_miles - 1.0).abs() < f64::EPSILON);
    }
}
