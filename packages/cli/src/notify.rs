//! Terminal notifier for proximity alerts.

use parkwatch_models::Report;
use parkwatch_proximity::AlertNotifier;

/// Prints the one-shot alert banner to the terminal.
///
/// Stands in for a platform push notification; if that surface is
/// unavailable this banner is the only visible alert.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl AlertNotifier for TerminalNotifier {
    fn notify(&mut self, report: &Report, distance_miles: f64) {
        println!();
        println!("🚨 Parking Officer Nearby!");
        println!(
            "A parking officer was reported {distance_miles:.2} miles from your car (at {:.4}, {:.4}).",
            report.lat, report.lng
        );
        if let Some(details) = &report.details {
            println!("Details: {details}");
        }
    }
}
