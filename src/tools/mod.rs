//! BrewCode Tools module
//!
//! MCP tool implementations for the fermentation calculators.

pub mod abv;
pub mod priming;
pub mod status;
pub mod units;

/// Round for display
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
