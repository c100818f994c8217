#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geolocation collaborator: single-shot "where am I now" lookups.
//!
//! Acquisition is bounded and may fail; failure leaves prior state
//! unchanged and is surfaced to the user, who retries or enters
//! coordinates manually. No automated retries.

use std::time::Duration;

use parkwatch_models::LatLng;

/// Fallback map-centering position used when no fix is available
/// (downtown Manhattan).
pub const DEFAULT_POSITION: LatLng = LatLng::new(40.7128, -74.006);

/// Errors from position acquisition.
#[derive(Debug, thiserror::Error)]
pub enum GeolocationError {
    /// The user or platform denied access to location data.
    #[error("location permission denied")]
    PermissionDenied,
    /// No position source is available on this device.
    #[error("location unavailable: {0}")]
    Unavailable(String),
    /// The fix did not arrive within the bounded wait.
    #[error("location request timed out after {0:?}")]
    TimedOut(Duration),
}

/// Single-shot position source.
///
/// Implementations must respect `timeout` as an upper bound on the
/// wait; a request abandoned by its caller must not mutate any state
/// when it eventually resolves.
pub trait PositionProvider {
    /// Acquires the current position, waiting at most `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`GeolocationError`] if permission is denied, no source
    /// is available, or the bounded wait elapses.
    fn current_position(&self, timeout: Duration) -> Result<LatLng, GeolocationError>;
}

/// Position provider backed by the `PARKWATCH_POSITION` environment
/// variable (`"lat,lng"`).
///
/// Stands in for a platform location service on devices without one;
/// an unset or malformed variable reports [`GeolocationError::Unavailable`].
#[derive(Debug, Default)]
pub struct EnvPositionProvider;

impl EnvPositionProvider {
    /// Environment variable consulted for the current position.
    pub const ENV_VAR: &'static str = "PARKWATCH_POSITION";
}

impl PositionProvider for EnvPositionProvider {
    fn current_position(&self, _timeout: Duration) -> Result<LatLng, GeolocationError> {
        let raw = std::env::var(Self::ENV_VAR).map_err(|_| {
            GeolocationError::Unavailable(format!("{} is not set", Self::ENV_VAR))
        })?;

        parse_position(&raw).ok_or_else(|| {
            GeolocationError::Unavailable(format!("{} is not \"lat,lng\": {raw:?}", Self::ENV_VAR))
        })
    }
}

/// Parses a `"lat,lng"` pair into a coordinate, rejecting non-finite
/// components.
#[must_use]
pub fn parse_position(raw: &str) -> Option<LatLng> {
    let (lat, lng) = raw.split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lng: f64 = lng.trim().parse().ok()?;

    let position = LatLng::new(lat, lng);
    position.is_finite().then_some(position)
}
