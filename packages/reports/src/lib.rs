#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Authoritative store for the live report collection.
//!
//! Owns creation (id + expiry assignment), periodic expiry sweeping,
//! and the persistence round-trip. Reports are append-only and
//! immutable; only live-set membership changes as they expire.

use parkwatch_models::{REPORT_TTL_MS, Report, ReportDraft, ReportId};
use parkwatch_storage::{KeyValueStorage, REPORTS_KEY, StorageError};

/// Errors from report store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The draft's coordinates were missing or non-finite. Nothing was
    /// persisted.
    #[error("invalid report location: coordinates must be finite numbers")]
    InvalidLocation,
    /// The persistence collaborator failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// The report collection could not be serialized.
    #[error("failed to serialize report collection: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The authoritative, persisted report collection.
///
/// Ordering contract: most-recent-first. New reports are prepended and
/// the map/list presentation relies on that order. Callers other than
/// the store treat the collection as a read-only snapshot.
#[derive(Debug, Default)]
pub struct ReportStore {
    reports: Vec<Report>,
}

impl ReportStore {
    /// Reconstructs the collection from persisted state, dropping any
    /// entry already expired at `now_ms`. Corrupt persisted JSON is
    /// logged and treated as an empty collection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if the store itself cannot be
    /// read.
    pub fn load(storage: &dyn KeyValueStorage, now_ms: i64) -> Result<Self, StoreError> {
        let Some(raw) = storage.get(REPORTS_KEY)? else {
            return Ok(Self::default());
        };

        let mut reports: Vec<Report> = match serde_json::from_str(&raw) {
            Ok(reports) => reports,
            Err(e) => {
                log::warn!("persisted reports are corrupt ({e}); starting with empty collection");
                Vec::new()
            }
        };

        let before = reports.len();
        reports.retain(|r| r.is_live(now_ms));
        if reports.len() < before {
            log::debug!("dropped {} expired report(s) at load", before - reports.len());
        }

        Ok(Self { reports })
    }

    /// Creates a report from `draft`, assigns a fresh id and
    /// `expires_at = now_ms + 90 minutes`, prepends it to the live
    /// collection, and persists the updated collection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidLocation`] if either coordinate is
    /// non-finite (no mutation happens), or [`StoreError::Storage`] if
    /// persisting fails.
    pub fn add_report(
        &mut self,
        storage: &mut dyn KeyValueStorage,
        draft: ReportDraft,
        now_ms: i64,
    ) -> Result<Report, StoreError> {
        if !draft.lat.is_finite() || !draft.lng.is_finite() {
            return Err(StoreError::InvalidLocation);
        }

        let report = Report {
            id: ReportId::random(),
            lat: draft.lat,
            lng: draft.lng,
            created_at: now_ms,
            expires_at: now_ms + REPORT_TTL_MS,
            officer_count: draft.officer_count,
            vehicle_type: draft.vehicle_type,
            direction: draft.direction,
            details: draft.details,
            reported_by: draft.reported_by.unwrap_or_else(|| "anonymous".to_string()),
        };

        log::info!(
            "new report {} at ({:.4}, {:.4}) by {}",
            report.id,
            report.lat,
            report.lng,
            report.reported_by
        );

        self.reports.insert(0, report.clone());
        self.persist(storage)?;

        Ok(report)
    }

    /// Removes every report with `expires_at <= now_ms`, persisting
    /// only when something was removed. Idempotent: a second sweep with
    /// the same `now_ms` is a no-op.
    ///
    /// Returns the number of reports removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Storage`] if persisting the shrunk
    /// collection fails.
    pub fn sweep_expired(
        &mut self,
        storage: &mut dyn KeyValueStorage,
        now_ms: i64,
    ) -> Result<usize, StoreError> {
        let before = self.reports.len();
        self.reports.retain(|r| r.is_live(now_ms));
        let removed = before - self.reports.len();

        if removed > 0 {
            log::debug!("swept {removed} expired report(s)");
            self.persist(storage)?;
        }

        Ok(removed)
    }

    /// Returns the reports still live at `now_ms`, in current
    /// collection order (most recent first). Pure read.
    pub fn live_reports(&self, now_ms: i64) -> impl Iterator<Item = &Report> {
        self.reports.iter().filter(move |r| r.is_live(now_ms))
    }

    /// Number of reports currently held, including any not yet swept.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    /// Returns `true` if the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    fn persist(&self, storage: &mut dyn KeyValueStorage) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.reports)?;
        storage.set(REPORTS_KEY, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkwatch_storage::MemoryStorage;

    const T0: i64 = 1_700_000_000_000;

    fn draft_at(lat: f64, lng: f64) -> ReportDraft {
        ReportDraft::at(lat, lng)
    }

    #[test]
    fn add_report_assigns_id_and_expiry() {
        let mut storage = MemoryStorage::new();
        let mut store = ReportStore::default();

        let report = store
            .add_report(&mut storage, draft_at(40.0, -74.0), T0)
            .unwrap();

        assert!(!report.id.as_str().is_empty());
        assert_eq!(report.created_at, T0);
        assert_eq!(report.expires_at, T0 + 5_400_000);
        assert_eq!(report.reported_by, "anonymous");
    }

    #[test]
    fn new_report_appears_first() {
        let mut storage = MemoryStorage::new();
        let mut store = ReportStore::default();

        let first = store
            .add_report(&mut storage, draft_at(40.0, -74.0), T0)
            .unwrap();
        let second = store
            .add_report(&mut storage, draft_at(41.0, -75.0), T0 + 1_000)
            .unwrap();

        let live: Vec<&Report> = store.live_reports(T0 + 2_000).collect();
        assert_eq!(live.len(), 2);
        assert_eq!(live[0].id, second.id);
        assert_eq!(live[1].id, first.id);
    }

    #[test]
    fn ids_are_unique() {
        let mut storage = MemoryStorage::new();
        let mut store = ReportStore::default();

        let a = store
            .add_report(&mut storage, draft_at(40.0, -74.0), T0)
            .unwrap();
        let b = store
            .add_report(&mut storage, draft_at(40.0, -74.0), T0)
            .unwrap();

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn rejects_non_finite_coordinates_without_mutation() {
        let mut storage = MemoryStorage::new();
        let mut store = ReportStore::default();

        let err = store
            .add_report(&mut storage, draft_at(f64::NAN, -74.0), T0)
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidLocation));

        let err = store
            .add_report(&mut storage, draft_at(40.0, f64::INFINITY), T0)
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidLocation));

        assert!(store.is_empty());
        assert_eq!(storage.get(REPORTS_KEY).unwrap(), None);
    }

    #[test]
    fn live_reports_excludes_expired() {
        let mut storage = MemoryStorage::new();
        let mut store = ReportStore::default();

        store
            .add_report(&mut storage, draft_at(40.0, -74.0), T0)
            .unwrap();

        let at_expiry = T0 + 5_400_000;
        assert_eq!(store.live_reports(at_expiry - 1).count(), 1);
        assert_eq!(store.live_reports(at_expiry).count(), 0);
    }

    #[test]
    fn sweep_is_idempotent() {
        let mut storage = MemoryStorage::new();
        let mut store = ReportStore::default();

        store
            .add_report(&mut storage, draft_at(40.0, -74.0), T0)
            .unwrap();
        store
            .add_report(&mut storage, draft_at(41.0, -75.0), T0 + 10_000)
            .unwrap();

        let now = T0 + 5_400_000;
        assert_eq!(store.sweep_expired(&mut storage, now).unwrap(), 1);
        assert_eq!(store.sweep_expired(&mut storage, now).unwrap(), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn persistence_round_trip_restores_live_subset() {
        let mut storage = MemoryStorage::new();
        let mut store = ReportStore::default();

        let keep = store
            .add_report(&mut storage, draft_at(40.0, -74.0), T0 + 100_000)
            .unwrap();
        store
            .add_report(&mut storage, draft_at(41.0, -75.0), T0)
            .unwrap();

        // Reload at a time where only the newer report is still live.
        let now = T0 + 5_400_000;
        let reloaded = ReportStore::load(&storage, now).unwrap();

        let live: Vec<&Report> = reloaded.live_reports(now).collect();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].id, keep.id);
        // Expired entries are dropped at load, never resurrected.
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn load_with_missing_key_is_empty() {
        let storage = MemoryStorage::new();
        let store = ReportStore::load(&storage, T0).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn load_with_corrupt_json_falls_back_to_empty() {
        let storage = MemoryStorage::with_entry(REPORTS_KEY, "{definitely not an array");
        let store = ReportStore::load(&storage, T0).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn draft_fields_pass_through_unchanged() {
        use parkwatch_models::{Direction, VehicleType};

        let mut storage = MemoryStorage::new();
        let mut store = ReportStore::default();

        let draft = ReportDraft {
            lat: 40.0,
            lng: -74.0,
            officer_count: Some(2),
            vehicle_type: Some(VehicleType::Segway),
            direction: Some(Direction::Westbound),
            details: Some("chalking tires on Main St".to_string()),
            reported_by: Some("StreetWatcher42".to_string()),
        };

        let report = store.add_report(&mut storage, draft, T0).unwrap();
        assert_eq!(report.officer_count, Some(2));
        assert_eq!(report.vehicle_type, Some(VehicleType::Segway));
        assert_eq!(report.direction, Some(Direction::Westbound));
        assert_eq!(report.details.as_deref(), Some("chalking tires on Main St"));
        assert_eq!(report.reported_by, "StreetWatcher42");
    }
}
