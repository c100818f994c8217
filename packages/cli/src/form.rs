//! Interactive report form and nickname prompt.
//!
//! Location comes first (device fix or manual entry), then the
//! optional descriptive fields. Location validation happens here; the
//! store re-checks finiteness.

use dialoguer::{Confirm, Input, Select};
use parkwatch_location::{GeolocationError, PositionProvider, parse_position};
use parkwatch_models::{
    Direction, LatLng, MAX_DETAILS_LEN, MAX_NICKNAME_LEN, ReportDraft, VehicleType,
};
use parkwatch_reports::{ReportStore, StoreError};
use parkwatch_storage::FileStorage;

use crate::{LOCATION_TIMEOUT, now_ms, truncate_chars};

/// Runs the interactive report form and submits the result.
pub fn run(
    storage: &mut FileStorage,
    provider: &dyn PositionProvider,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Report a parking officer sighting.");
    println!("Your report will be visible for about 90 minutes.");
    println!();

    let Some(location) = prompt_location(provider)? else {
        println!("Cancelled.");
        return Ok(());
    };

    let officer_count = prompt_officer_count()?;
    let vehicle_type = prompt_select("Vehicle type", VehicleType::ALL)?;
    let direction = prompt_select("Direction of travel", Direction::ALL)?;
    let details = prompt_details()?;

    let nickname = parkwatch_identity::load_identity(storage)?.map(|id| id.nickname);

    let now = now_ms();
    let mut store = ReportStore::load(storage, now)?;
    let draft = ReportDraft {
        lat: location.lat,
        lng: location.lng,
        officer_count,
        vehicle_type,
        direction,
        details,
        reported_by: nickname,
    };

    match store.add_report(storage, draft, now) {
        Ok(report) => {
            let identity = parkwatch_identity::increment_report_count(storage)?;
            println!();
            println!("Report {} submitted. Thank you for helping the community!", report.id);
            println!(
                "You have submitted {} report(s); trust level {}.",
                identity.report_count,
                identity.trust_level()
            );
        }
        Err(StoreError::InvalidLocation) => {
            println!("Please provide a valid location. Nothing was submitted.");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

/// Prompts for the sighting location: device fix first, manual entry as
/// the fallback or on explicit decline. Returns `None` on empty manual
/// entry (cancel).
fn prompt_location(
    provider: &dyn PositionProvider,
) -> Result<Option<LatLng>, Box<dyn std::error::Error>> {
    let use_fix = Confirm::new()
        .with_prompt("Use your current location?")
        .default(true)
        .interact()?;

    if use_fix {
        match provider.current_position(LOCATION_TIMEOUT) {
            Ok(position) => {
                println!("Using ({:.6}, {:.6})", position.lat, position.lng);
                return Ok(Some(position));
            }
            Err(e @ GeolocationError::PermissionDenied) => {
                println!("Could not get your location: {e}. Enter it manually.");
            }
            Err(e) => {
                log::warn!("position fix failed: {e}");
                println!("Could not get your location. Enter it manually.");
            }
        }
    }

    let raw: String = Input::new()
        .with_prompt("Location as \"lat,lng\" (empty to cancel)")
        .allow_empty(true)
        .interact_text()?;
    if raw.trim().is_empty() {
        return Ok(None);
    }

    let parsed = parse_position(&raw);
    if parsed.is_none() {
        println!("That is not a valid \"lat,lng\" pair.");
    }
    Ok(parsed)
}

fn prompt_officer_count() -> Result<Option<u8>, Box<dyn std::error::Error>> {
    let raw: String = Input::new()
        .with_prompt("Officer count, 1-20 (empty to skip)")
        .allow_empty(true)
        .interact_text()?;
    if raw.trim().is_empty() {
        return Ok(None);
    }

    match raw.trim().parse::<u8>() {
        Ok(count) if (1..=20).contains(&count) => Ok(Some(count)),
        _ => {
            println!("Ignoring officer count: expected a number from 1 to 20.");
            Ok(None)
        }
    }
}

/// Select over an enum's presentation order, with a leading skip entry.
fn prompt_select<T: Copy + std::fmt::Display>(
    prompt: &str,
    options: &[T],
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let mut items = vec!["(skip)".to_string()];
    items.extend(options.iter().map(ToString::to_string));

    let idx = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact()?;

    Ok(if idx == 0 { None } else { Some(options[idx - 1]) })
}

fn prompt_details() -> Result<Option<String>, Box<dyn std::error::Error>> {
    let raw: String = Input::new()
        .with_prompt("Additional details (empty to skip)")
        .allow_empty(true)
        .interact_text()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    Ok(Some(truncate_chars(trimmed, MAX_DETAILS_LEN)))
}

/// Prompts for and stores a nickname; an empty answer stays anonymous.
pub fn prompt_nickname(storage: &mut FileStorage) -> Result<(), Box<dyn std::error::Error>> {
    println!("Choose a nickname to identify your reports.");
    println!("It builds your trust score over time.");

    let raw: String = Input::new()
        .with_prompt("Nickname (empty to stay Anonymous)")
        .allow_empty(true)
        .interact_text()?;

    let name = truncate_chars(raw.trim(), MAX_NICKNAME_LEN);
    let identity = parkwatch_identity::set_nickname(storage, &name)?;
    println!(
        "Saved. Reporting as {} (trust level {}).",
        identity.nickname,
        identity.trust_level()
    );

    Ok(())
}
