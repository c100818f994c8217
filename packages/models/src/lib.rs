#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared data model for the parkwatch client.
//!
//! Defines the persisted record types (reports, proximity settings,
//! identity) and the enums used across the report store, proximity
//! monitor, and presentation layer. All persisted types serialize to
//! camelCase JSON so existing on-disk data stays readable.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// How long a report stays live after creation: 90 minutes.
pub const REPORT_TTL_MS: i64 = 90 * 60 * 1000;

/// Maximum length of the free-text details field.
pub const MAX_DETAILS_LEN: usize = 500;

/// Maximum length of a user nickname.
pub const MAX_NICKNAME_LEN: usize = 20;

/// Smallest configurable alert radius, in miles.
pub const MIN_RADIUS_MILES: f64 = 0.5;

/// Largest configurable alert radius, in miles.
pub const MAX_RADIUS_MILES: f64 = 1.0;

/// A WGS84 coordinate pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl LatLng {
    /// Creates a coordinate pair.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns `true` if both components are finite numbers.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Opaque unique identifier for a report, assigned once at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(String);

impl ReportId {
    /// Generates a fresh random id.
    #[must_use]
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ReportId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ReportId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Kind of vehicle the reported officer was using.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum VehicleType {
    Car,
    Motorcycle,
    Bicycle,
    OnFoot,
    Segway,
    Other,
}

impl VehicleType {
    /// All vehicle types, in presentation order.
    pub const ALL: &[Self] = &[
        Self::Car,
        Self::Motorcycle,
        Self::Bicycle,
        Self::OnFoot,
        Self::Segway,
        Self::Other,
    ];
}

/// Direction of travel observed for the reported officer.
///
/// Wire form matches the variant name exactly (`"Northbound"`, ...).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub enum Direction {
    Northbound,
    Southbound,
    Eastbound,
    Westbound,
    Stationary,
    Unknown,
}

impl Direction {
    /// All directions, in presentation order.
    pub const ALL: &[Self] = &[
        Self::Northbound,
        Self::Southbound,
        Self::Eastbound,
        Self::Westbound,
        Self::Stationary,
        Self::Unknown,
    ];
}

/// A single crowdsourced sighting of an enforcement officer.
///
/// Immutable after creation: no field is ever updated, only membership
/// in the live set changes as reports expire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Unique report id.
    pub id: ReportId,
    /// Sighting latitude in degrees.
    pub lat: f64,
    /// Sighting longitude in degrees.
    pub lng: f64,
    /// Creation timestamp, milliseconds since epoch.
    pub created_at: i64,
    /// Expiry timestamp: `created_at + REPORT_TTL_MS`, computed once.
    pub expires_at: i64,
    /// Number of officers sighted (1-20).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub officer_count: Option<u8>,
    /// Vehicle the officer was using.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<VehicleType>,
    /// Direction of travel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    /// Free-text details, at most [`MAX_DETAILS_LEN`] characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Display name of the reporter.
    pub reported_by: String,
}

impl Report {
    /// Returns the sighting location as a coordinate pair.
    #[must_use]
    pub const fn location(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    /// Returns `true` if this report has not expired at `now_ms`.
    #[must_use]
    pub const fn is_live(&self, now_ms: i64) -> bool {
        self.expires_at > now_ms
    }
}

/// Caller-supplied fields for a new report, before the store assigns an
/// id and expiry.
#[derive(Debug, Clone, Default)]
pub struct ReportDraft {
    /// Sighting latitude in degrees.
    pub lat: f64,
    /// Sighting longitude in degrees.
    pub lng: f64,
    /// Number of officers sighted (1-20).
    pub officer_count: Option<u8>,
    /// Vehicle the officer was using.
    pub vehicle_type: Option<VehicleType>,
    /// Direction of travel.
    pub direction: Option<Direction>,
    /// Free-text details.
    pub details: Option<String>,
    /// Display name of the reporter; `None` falls back to `"anonymous"`.
    pub reported_by: Option<String>,
}

impl ReportDraft {
    /// Creates a draft with just a location; optional fields default to
    /// empty.
    #[must_use]
    pub fn at(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            ..Self::default()
        }
    }
}

/// User-configured proximity alerting settings.
///
/// Persisted as `{enabled, carLocation|null, radiusMiles}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProximitySettings {
    /// Master toggle for proximity alerting.
    pub enabled: bool,
    /// The saved reference point (e.g. a parked car). Set explicitly by
    /// the user, never auto-tracked.
    pub car_location: Option<LatLng>,
    /// Alert radius in miles, clamped to
    /// [`MIN_RADIUS_MILES`]..=[`MAX_RADIUS_MILES`].
    pub radius_miles: f64,
}

impl Default for ProximitySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            car_location: None,
            radius_miles: MIN_RADIUS_MILES,
        }
    }
}

impl ProximitySettings {
    /// Sets the radius, clamping it to the allowed range.
    pub fn set_radius_miles(&mut self, radius: f64) {
        self.radius_miles = radius.clamp(MIN_RADIUS_MILES, MAX_RADIUS_MILES);
    }

    /// Returns a copy with the radius clamped to the allowed range.
    ///
    /// Applied on load so out-of-range persisted values are repaired
    /// rather than rejected.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.radius_miles = self.radius_miles.clamp(MIN_RADIUS_MILES, MAX_RADIUS_MILES);
        self
    }
}

/// The local user's identity record: `{nickname, reportCount}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Chosen display name, at most [`MAX_NICKNAME_LEN`] characters.
    pub nickname: String,
    /// Number of reports this user has submitted. Monotonically
    /// increasing.
    pub report_count: u32,
}

impl Identity {
    /// Returns the trust tier for this identity's report count.
    #[must_use]
    pub const fn trust_level(&self) -> TrustLevel {
        TrustLevel::from_report_count(self.report_count)
    }
}

/// Display-only trust tier derived from cumulative report count.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display, AsRefStr,
)]
pub enum TrustLevel {
    New,
    Newcomer,
    Regular,
    Trusted,
    Veteran,
}

impl TrustLevel {
    /// Derives the trust tier from a report count.
    ///
    /// Step function: 0 is New, 1-4 Newcomer, 5-9 Regular, 10-19
    /// Trusted, 20 and above Veteran.
    #[must_use]
    pub const fn from_report_count(count: u32) -> Self {
        match count {
            0 => Self::New,
            1..=4 => Self::Newcomer,
            5..=9 => Self::Regular,
            10..=19 => Self::Trusted,
            _ => Self::Veteran,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trust_level_boundaries() {
        assert_eq!(TrustLevel::from_report_count(0), TrustLevel::New);
        assert_eq!(TrustLevel::from_report_count(1), TrustLevel::Newcomer);
        assert_eq!(TrustLevel::from_report_count(4), TrustLevel::Newcomer);
        assert_eq!(TrustLevel::from_report_count(5), TrustLevel::Regular);
        assert_eq!(TrustLevel::from_report_count(9), TrustLevel::Regular);
        assert_eq!(TrustLevel::from_report_count(10), TrustLevel::Trusted);
        assert_eq!(TrustLevel::from_report_count(19), TrustLevel::Trusted);
        assert_eq!(TrustLevel::from_report_count(20), TrustLevel::Veteran);
    }

    #[test]
    fn trust_level_displays_tier_name() {
        assert_eq!(TrustLevel::New.to_string(), "New");
        assert_eq!(TrustLevel::Veteran.to_string(), "Veteran");
    }

    #[test]
    fn vehicle_type_uses_kebab_case_wire_form() {
        let json = serde_json::to_string(&VehicleType::OnFoot).unwrap();
        assert_eq!(json, "\"on-foot\"");
        let back: VehicleType = serde_json::from_str("\"on-foot\"").unwrap();
        assert_eq!(back, VehicleType::OnFoot);
    }

    #[test]
    fn direction_round_trips_capitalized() {
        let json = serde_json::to_string(&Direction::Northbound).unwrap();
        assert_eq!(json, "\"Northbound\"");
    }

    #[test]
    fn report_serializes_camel_case() {
        let report = Report {
            id: ReportId::from("abc"),
            lat: 40.0,
            lng: -74.0,
            created_at: 1_000,
            expires_at: 1_000 + REPORT_TTL_MS,
            officer_count: Some(2),
            vehicle_type: Some(VehicleType::Car),
            direction: None,
            details: None,
            reported_by: "anonymous".to_string(),
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"createdAt\":1000"));
        assert!(json.contains("\"expiresAt\":5401000"));
        assert!(json.contains("\"officerCount\":2"));
        assert!(json.contains("\"reportedBy\":\"anonymous\""));
        assert!(!json.contains("direction"));
    }

    #[test]
    fn settings_default_matches_first_run_state() {
        let settings = ProximitySettings::default();
        assert!(!settings.enabled);
        assert!(settings.car_location.is_none());
        assert!((settings.radius_miles - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn settings_radius_clamped_to_bounds() {
        let mut settings = ProximitySettings::default();
        settings.set_radius_miles(2.0);
        assert!((settings.radius_miles - 1.0).abs() < f64::EPSILON);
        settings.set_radius_miles(0.1);
        assert!((settings.radius_miles - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn settings_persisted_shape_uses_car_location_key() {
        let settings = ProximitySettings {
            enabled: true,
            car_location: Some(LatLng::new(40.7128, -74.006)),
            radius_miles: 0.75,
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"carLocation\":{\"lat\":40.7128"));
        assert!(json.contains("\"radiusMiles\":0.75"));
    }

    #[test]
    fn report_liveness_is_strict() {
        let report = Report {
            id: ReportId::random(),
            lat: 0.0,
            lng: 0.0,
            created_at: 0,
            expires_at: 100,
            officer_count: None,
            vehicle_type: None,
            direction: None,
            details: None,
            reported_by: "anonymous".to_string(),
        };
        assert!(report.is_live(99));
        assert!(!report.is_live(100));
        assert!(!report.is_live(101));
    }
}
