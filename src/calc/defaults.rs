//! Default values and empirical constants shared by the calculators

use serde::Serialize;

// ============================================================================
// Calculator defaults
// ============================================================================

/// Density scale assumed for raw gravity readings
pub const DEFAULT_DENSITY_SCALE: &str = "sg";
/// Temperature scale assumed for raw temperature readings
pub const DEFAULT_TEMP_SCALE: &str = "c";
/// Hydrometer calibration temperature (°C unless a scale says otherwise)
pub const DEFAULT_CALIBRATION_TEMP: f64 = 20.0;
/// Formula used when none is requested
pub const DEFAULT_FORMULA: &str = "abv-basic";
/// Unit assumed for the beverage volume
pub const DEFAULT_VOLUME_UNIT: &str = "l";
/// Beverage temperature assumed for priming
pub const DEFAULT_BEVERAGE_TEMP: f64 = 20.0;
/// Carbonation target in volumes of CO2
pub const DEFAULT_VOL_CO2: f64 = 2.0;
/// Priming sugar used when none is named
pub const DEFAULT_SUGAR_TYPE: &str = "dextrose";

// ============================================================================
// Priming model constants
// ============================================================================

/// Residual CO2 quadratic: `a + b·T + c·T²` with T in °C
pub const RESIDUAL_CO2_A: f64 = 3.0378;
pub const RESIDUAL_CO2_B: f64 = -0.050062;
pub const RESIDUAL_CO2_C: f64 = 0.00026555;

/// Grams of fully fermentable sugar per litre per volume of CO2
pub const GRAMS_PER_LITRE_PER_VOLUME: f64 = 4.01;

/// Gravity points contributed per g/L of dissolved sugar
pub const SG_PER_GRAM_PER_LITRE: f64 = 0.0004;

// ============================================================================
// Sugar profiles
// ============================================================================

/// Physical properties of a priming sugar
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SugarProfile {
    pub name: &'static str,
    /// Share of the sugar mass that ferments, in (0, 1]
    pub fermentable_fraction: f64,
    /// Density in grams per litre
    pub density_g_per_l: f64,
}

pub const DEXTROSE: SugarProfile = SugarProfile {
    name: "dextrose",
    fermentable_fraction: 1.0,
    density_g_per_l: 1587.0,
};

pub const SUCROSE: SugarProfile = SugarProfile {
    name: "sucrose",
    fermentable_fraction: 1.0,
    density_g_per_l: 1587.0,
};

pub const HONEY: SugarProfile = SugarProfile {
    name: "honey",
    fermentable_fraction: 0.75,
    density_g_per_l: 1420.0,
};

pub const MALTOSE: SugarProfile = SugarProfile {
    name: "maltose",
    fermentable_fraction: 1.0,
    density_g_per_l: 1540.0,
};

/// Built-in sugar table
pub static SUGAR_PROFILES: [SugarProfile; 4] = [DEXTROSE, SUCROSE, HONEY, MALTOSE];

/// Look up a sugar by name (case-insensitive)
pub fn sugar_profile(name: &str) -> Option<&'static SugarProfile> {
    let lower = name.trim().to_lowercase();
    SUGAR_PROFILES.iter().find(|p| p.name == lower)
}
