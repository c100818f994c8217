//! Interactive proximity settings: toggle, car location, radius.

use dialoguer::{Confirm, Input};
use parkwatch_location::{PositionProvider, parse_position};
use parkwatch_models::{MAX_RADIUS_MILES, MIN_RADIUS_MILES};
use parkwatch_storage::FileStorage;

use crate::LOCATION_TIMEOUT;

/// Runs the interactive settings editor and persists the result.
///
/// Changes never clear an alert already showing in a running watch
/// session; they only affect future transitions.
pub fn run(
    storage: &mut FileStorage,
    provider: &dyn PositionProvider,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = parkwatch_proximity::load_settings(storage)?;

    settings.enabled = Confirm::new()
        .with_prompt("Enable proximity alerts?")
        .default(settings.enabled)
        .interact()?;

    if settings.enabled {
        let set_car = Confirm::new()
            .with_prompt(match settings.car_location {
                Some(car) => format!("Car location is ({:.4}, {:.4}). Update it?", car.lat, car.lng),
                None => "No car location saved. Set it now?".to_string(),
            })
            .default(settings.car_location.is_none())
            .interact()?;

        if set_car
            && let Some(car) = prompt_car_location(provider)?
        {
            settings.car_location = Some(car);
        }

        let radius: f64 = Input::new()
            .with_prompt(format!(
                "Alert radius in miles ({MIN_RADIUS_MILES}-{MAX_RADIUS_MILES})"
            ))
            .default(settings.radius_miles)
            .interact_text()?;
        settings.set_radius_miles(radius);
    }

    parkwatch_proximity::save_settings(storage, &settings)?;

    println!(
        "Saved. Alerts {}, radius {:.2} mi.",
        if settings.enabled { "on" } else { "off" },
        settings.radius_miles
    );
    if settings.enabled && settings.car_location.is_none() {
        println!("Note: alerts stay silent until a car location is saved.");
    }

    Ok(())
}

fn prompt_car_location(
    provider: &dyn PositionProvider,
) -> Result<Option<parkwatch_models::LatLng>, Box<dyn std::error::Error>> {
    let use_fix = Confirm::new()
        .with_prompt("Use your current location for the car?")
        .default(true)
        .interact()?;

    if use_fix {
        match provider.current_position(LOCATION_TIMEOUT) {
            Ok(position) => return Ok(Some(position)),
            Err(e) => {
                // Prior state unchanged; the user falls back to manual
                // entry or retries later.
                log::warn!("position fix failed: {e}");
                println!("Could not get your location ({e}).");
            }
        }
    }

    let raw: String = Input::new()
        .with_prompt("Car location as \"lat,lng\" (empty to keep current)")
        .allow_empty(true)
        .interact_text()?;
    if raw.trim().is_empty() {
        return Ok(None);
    }

    let parsed = parse_position(&raw);
    if parsed.is_none() {
        println!("That is not a valid \"lat,lng\" pair; keeping the previous location.");
    }
    Ok(parsed)
}
