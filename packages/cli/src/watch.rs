//! Foreground sweep-and-alert loop.
//!
//! Every 30 seconds: reload the store (another invocation may have
//! added reports), sweep expired entries, and re-evaluate proximity.
//! The monitor's alerted-id set lives for the session only, so an
//! alert never resurrects across restarts of this loop.

use std::path::Path;
use std::time::Duration;

use dialoguer::Confirm;
use parkwatch_proximity::ProximityMonitor;
use parkwatch_reports::ReportStore;
use parkwatch_storage::FileStorage;

use crate::{notify::TerminalNotifier, now_ms};

/// Cadence of expiry sweeping and proximity re-evaluation.
const SWEEP_INTERVAL: Duration = Duration::from_secs(30);

/// Runs the watch loop until interrupted.
pub fn run(store_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut monitor = ProximityMonitor::new();
    let mut notifier = TerminalNotifier;

    {
        let storage = FileStorage::open(store_path)?;
        let settings = parkwatch_proximity::load_settings(&storage)?;
        if !settings.enabled {
            println!("Proximity alerts are disabled. Run `parkwatch settings` to enable them.");
        } else if settings.car_location.is_none() {
            println!("No car location saved. Run `parkwatch settings` to set one.");
        }
    }
    println!("Watching (sweep every {}s). Ctrl-C to stop.", SWEEP_INTERVAL.as_secs());

    loop {
        if let Err(e) = tick(store_path, &mut monitor, &mut notifier) {
            // Local store problems are transient here; keep watching.
            log::error!("watch tick failed: {e}");
        }

        if monitor.current_alert().is_some() {
            let dismissed = Confirm::new()
                .with_prompt("Dismiss this alert?")
                .default(true)
                .interact()?;
            if dismissed {
                monitor.dismiss();
            }
        }

        std::thread::sleep(SWEEP_INTERVAL);
    }
}

/// One sweep-and-evaluate pass. Reloads storage so concurrent writers
/// are picked up; last writer wins on the single local store.
fn tick(
    store_path: &Path,
    monitor: &mut ProximityMonitor,
    notifier: &mut TerminalNotifier,
) -> Result<(), Box<dyn std::error::Error>> {
    let now = now_ms();
    let mut storage = FileStorage::open(store_path)?;
    let mut store = ReportStore::load(&storage, now)?;

    let removed = store.sweep_expired(&mut storage, now)?;
    if removed > 0 {
        log::info!("{removed} report(s) expired");
    }

    let settings = parkwatch_proximity::load_settings(&storage)?;
    let live: Vec<_> = store.live_reports(now).cloned().collect();
    monitor.evaluate(live.iter(), &settings, notifier);

    Ok(())
}
