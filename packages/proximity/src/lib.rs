#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Proximity alerting: matches the live report set against the user's
//! saved reference point and raises at most one actionable alert per
//! report.
//!
//! The monitor is a two-state machine (Idle / Alerting). It reads the
//! report collection as a snapshot and owns only its alerted-id set and
//! the single current-alert slot; both are deliberately in-memory-only
//! so an alert never resurrects after a restart.

mod settings;

pub use settings::{SettingsError, load_settings, save_settings};

use std::collections::HashSet;

use parkwatch_geo::distance_miles;
use parkwatch_models::{ProximitySettings, Report, ReportId};

/// Receives the one-shot notification side effect for each
/// `Idle -> Alerting` transition.
///
/// Best effort: implementations may drop the notification (e.g. when
/// push permission is denied); the monitor's in-memory alert slot is
/// the source of truth either way.
pub trait AlertNotifier {
    /// Called exactly once per alerted report, with the distance from
    /// the reference point in miles.
    fn notify(&mut self, report: &Report, distance_miles: f64);
}

/// Notifier that only logs. Useful when no notification surface is
/// available.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl AlertNotifier for LogNotifier {
    fn notify(&mut self, report: &Report, distance_miles: f64) {
        log::info!(
            "proximity alert: report {} is {distance_miles:.2} miles from the reference point",
            report.id
        );
    }
}

/// The proximity alerting state machine.
///
/// `Idle` when `current_alert()` is `None`, `Alerting` otherwise.
/// Re-evaluation only acts while Idle: an active alert is never
/// displaced by a newer qualifying report, and only an explicit
/// [`dismiss`](Self::dismiss) returns the monitor to Idle.
#[derive(Debug, Default)]
pub struct ProximityMonitor {
    /// Ids that have already alerted this session. Never persisted,
    /// never shrinks.
    alerted: HashSet<ReportId>,
    current: Option<Report>,
}

impl ProximityMonitor {
    /// Creates a monitor with an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The report currently surfaced to the user, if any.
    #[must_use]
    pub fn current_alert(&self) -> Option<&Report> {
        self.current.as_ref()
    }

    /// Returns `true` if `id` has already produced an alert this
    /// session.
    #[must_use]
    pub fn has_alerted(&self, id: &ReportId) -> bool {
        self.alerted.contains(id)
    }

    /// Re-evaluates the live report snapshot against the settings.
    ///
    /// Call on every change to the live report set, the reference
    /// location, or the enabled flag. No-op unless all of: the monitor
    /// is Idle, alerting is enabled, and a reference location is set.
    ///
    /// The first report in snapshot order that has not yet alerted and
    /// lies within the radius wins; the contract is "first
    /// newly-qualifying report found", not "nearest". On a match the id
    /// is marked alerted for the rest of the session, `notifier` fires
    /// once, and the monitor transitions to Alerting.
    ///
    /// Returns the newly raised alert, if any.
    pub fn evaluate<'a, I>(
        &mut self,
        live_reports: I,
        settings: &ProximitySettings,
        notifier: &mut dyn AlertNotifier,
    ) -> Option<&Report>
    where
        I: IntoIterator<Item = &'a Report>,
    {
        if self.current.is_some() {
            return None;
        }
        if !settings.enabled {
            return None;
        }
        let Some(car) = settings.car_location else {
            return None;
        };

        for report in live_reports {
            if self.alerted.contains(&report.id) {
                continue;
            }
            let dist = distance_miles(car, report.location());
            if dist <= settings.radius_miles {
                // Permanent for the session: dismissal or expiry must
                // never cause a re-alert on this id.
                self.alerted.insert(report.id.clone());
                notifier.notify(report, dist);
                log::debug!("monitor Idle -> Alerting on report {}", report.id);
                self.current = Some(report.clone());
                return self.current.as_ref();
            }
        }

        None
    }

    /// Explicit user dismissal: the only transition back to Idle.
    ///
    /// Report expiry and settings changes never clear an active alert.
    pub fn dismiss(&mut self) {
        if let Some(report) = self.current.take() {
            log::debug!("monitor Alerting -> Idle (dismissed report {})", report.id);
        }
    }
}
