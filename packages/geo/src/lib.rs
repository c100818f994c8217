#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Great-circle distance between two coordinates.
//!
//! Single pure function used by the proximity monitor to decide whether
//! a live report falls inside the user's alert radius.

use parkwatch_models::LatLng;

/// Mean Earth radius in miles.
const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Returns the haversine great-circle distance between two points, in
/// miles.
///
/// Deterministic and side-effect free. Callers are responsible for
/// passing finite coordinates; NaN inputs propagate as NaN rather than
/// panicking.
#[must_use]
pub fn distance_miles(a: LatLng, b: LatLng) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

    EARTH_RADIUS_MILES * 2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}
