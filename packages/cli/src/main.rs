#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Terminal presentation surface for the parkwatch client.
//!
//! Thin collaborator around the core crates: an interactive report
//! form, nickname prompt, proximity settings, a live-report listing,
//! and a foreground watch loop that sweeps expired reports and raises
//! proximity alerts.

mod form;
mod notify;
mod settings;
mod watch;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use parkwatch_geo::distance_miles;
use parkwatch_location::EnvPositionProvider;
use parkwatch_reports::ReportStore;
use parkwatch_storage::FileStorage;

/// Bounded wait for a single-shot position fix.
const LOCATION_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Parser)]
#[command(name = "parkwatch", about = "Crowdsourced parking-enforcement sighting alerts")]
struct Cli {
    /// Path of the local store file (default: data/parkwatch-store.json,
    /// honoring PARKWATCH_DATA_DIR).
    #[arg(long)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Submit a sighting report interactively.
    Report,
    /// Choose the nickname shown on your reports.
    Nickname,
    /// List reports that are still live.
    List,
    /// Configure proximity alerting (toggle, car location, radius).
    Settings,
    /// Show your identity, trust level, and current settings.
    Status,
    /// Run the sweep-and-alert loop in the foreground.
    Watch,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let cli = Cli::parse();
    let store_path = cli
        .store
        .unwrap_or_else(parkwatch_storage::paths::store_path);

    let mut storage = FileStorage::open(&store_path)?;

    match cli.command {
        Command::Report => form::run(&mut storage, &EnvPositionProvider)?,
        Command::Nickname => form::prompt_nickname(&mut storage)?,
        Command::List => list_reports(&storage)?,
        Command::Settings => settings::run(&mut storage, &EnvPositionProvider)?,
        Command::Status => print_status(&storage)?,
        Command::Watch => watch::run(&store_path)?,
    }

    Ok(())
}

/// Milliseconds since the Unix epoch.
fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Truncates to at most `max` characters, respecting char boundaries.
fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn list_reports(storage: &FileStorage) -> Result<(), Box<dyn std::error::Error>> {
    let now = now_ms();
    let store = ReportStore::load(storage, now)?;
    let settings = parkwatch_proximity::load_settings(storage)?;

    let live: Vec<_> = store.live_reports(now).collect();
    if live.is_empty() {
        println!("No live reports.");
        return Ok(());
    }

    println!("{} live report(s), most recent first:", live.len());
    for report in live {
        let age_min = (now - report.created_at) / 60_000;
        let left_min = (report.expires_at - now) / 60_000;

        let mut line = format!(
            "  ({:.4}, {:.4})  {}m ago, {}m left  by {}",
            report.lat, report.lng, age_min, left_min, report.reported_by
        );
        if let Some(car) = settings.car_location {
            let dist = distance_miles(car, report.location());
            line.push_str(&format!("  [{dist:.2} mi from car]"));
        }
        if let Some(count) = report.officer_count {
            line.push_str(&format!("  {count} officer(s)"));
        }
        if let Some(vehicle) = report.vehicle_type {
            line.push_str(&format!("  {vehicle}"));
        }
        if let Some(direction) = report.direction {
            line.push_str(&format!("  {direction}"));
        }
        println!("{line}");
        if let Some(details) = &report.details {
            println!("      {details}");
        }
    }

    Ok(())
}

fn print_status(storage: &FileStorage) -> Result<(), Box<dyn std::error::Error>> {
    match parkwatch_identity::load_identity(storage)? {
        Some(identity) => {
            println!(
                "{} — {} report(s), trust level {}",
                identity.nickname,
                identity.report_count,
                identity.trust_level()
            );
        }
        None => println!("No identity set yet. Run `parkwatch nickname` to choose one."),
    }

    let settings = parkwatch_proximity::load_settings(storage)?;
    println!(
        "Alerts {}, radius {:.2} mi, car location {}",
        if settings.enabled { "on" } else { "off" },
        settings.radius_miles,
        settings.car_location.map_or_else(
            || "not set".to_string(),
            |car| format!("({:.4}, {:.4})", car.lat, car.lng)
        )
    );

    Ok(())
}
