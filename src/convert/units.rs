//! Unit types and conversion constants
//!
//! Provides types for representing measurement scales and standard conversion factors.

use serde::{Deserialize, Serialize};

/// Category of a measurement unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitCategory {
    /// Temperature scales (c, f, k)
    Temperature,
    /// Liquid volume units (l, ml, gal, ...)
    Volume,
    /// Mass units (g, kg, oz, lb)
    Mass,
    /// Sugar-content density scales (sg, brix, plato, oe)
    Density,
}

impl UnitCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitCategory::Temperature => "temperature",
            UnitCategory::Volume => "volume",
            UnitCategory::Mass => "mass",
            UnitCategory::Density => "density",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "temperature" | "temp" => Some(UnitCategory::Temperature),
            "volume" => Some(UnitCategory::Volume),
            "mass" | "weight" => Some(UnitCategory::Mass),
            "density" | "gravity" => Some(UnitCategory::Density),
            _ => None,
        }
    }
}

impl std::fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Density scale of a gravity reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DensityScale {
    /// Specific gravity, the canonical scale for ABV formulas
    Sg,
    Brix,
    Plato,
    /// Oechsle degrees
    Oe,
}

impl DensityScale {
    pub fn as_str(&self) -> &'static str {
        match self {
            DensityScale::Sg => "sg",
            DensityScale::Brix => "brix",
            DensityScale::Plato => "plato",
            DensityScale::Oe => "oe",
        }
    }

    /// Parse a scale name, accepting the common aliases
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sg" | "specific gravity" | "gravity" => Some(DensityScale::Sg),
            "brix" | "bx" | "°bx" | "°brix" => Some(DensityScale::Brix),
            "plato" | "p" | "°p" | "°plato" => Some(DensityScale::Plato),
            "oe" | "°oe" | "oechsle" => Some(DensityScale::Oe),
            _ => None,
        }
    }
}

/// Temperature scale of a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TempScale {
    #[serde(rename = "c")]
    Celsius,
    #[serde(rename = "f")]
    Fahrenheit,
    #[serde(rename = "k")]
    Kelvin,
}

impl TempScale {
    pub fn as_str(&self) -> &'static str {
        match self {
            TempScale::Celsius => "c",
            TempScale::Fahrenheit => "f",
            TempScale::Kelvin => "k",
        }
    }

    /// Parse a scale name, accepting the common aliases
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "c" | "°c" | "celsius" | "centigrade" => Some(TempScale::Celsius),
            "f" | "°f" | "fahrenheit" => Some(TempScale::Fahrenheit),
            "k" | "kelvin" => Some(TempScale::Kelvin),
            _ => None,
        }
    }

    /// Convert a value in this scale to degrees Celsius
    pub fn to_celsius(&self, value: f64) -> f64 {
        match self {
            TempScale::Celsius => value,
            TempScale::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            TempScale::Kelvin => value - 273.15,
        }
    }

    /// Convert a Celsius value into this scale
    pub fn from_celsius(&self, celsius: f64) -> f64 {
        match self {
            TempScale::Celsius => celsius,
            TempScale::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            TempScale::Kelvin => celsius + 273.15,
        }
    }
}

// ============================================================================
// Volume Conversion Constants (to litres)
// ============================================================================

/// Litres per millilitre
pub const L_PER_ML: f64 = 0.001;
/// Litres per US gallon
pub const L_PER_US_GALLON: f64 = 3.785411784;
/// Litres per imperial gallon
pub const L_PER_IMP_GALLON: f64 = 4.54609;
/// Litres per US quart
pub const L_PER_US_QUART: f64 = 0.946352946;
/// Litres per US pint
pub const L_PER_US_PINT: f64 = 0.473176473;
/// Litres per US fluid ounce
pub const L_PER_US_FL_OZ: f64 = 0.0295735295625;

// ============================================================================
// Mass Conversion Constants (to grams)
// ============================================================================

/// Grams per milligram
pub const G_PER_MG: f64 = 0.001;
/// Grams per kilogram
pub const G_PER_KG: f64 = 1000.0;
/// Grams per ounce
pub const G_PER_OZ: f64 = 28.349523125;
/// Grams per pound
pub const G_PER_LB: f64 = 453.59237;

// ============================================================================
// Unit Recognition
// ============================================================================

/// Resolve a unit string (or alias) to its canonical key within a category
pub fn canonical_unit(unit: &str, category: UnitCategory) -> Option<&'static str> {
    let lower = unit.to_lowercase();
    let trimmed = lower.trim();

    match category {
        UnitCategory::Temperature => TempScale::from_str(trimmed).map(|s| s.as_str()),
        UnitCategory::Density => DensityScale::from_str(trimmed).map(|s| s.as_str()),
        UnitCategory::Volume => match trimmed {
            "l" | "liter" | "liters" | "litre" | "litres" => Some("l"),
            "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => Some("ml"),
            "gal" | "gallon" | "gallons" | "us gal" | "us gallon" => Some("gal"),
            "imp_gal" | "imp gal" | "imperial gallon" | "uk gallon" => Some("imp_gal"),
            "qt" | "quart" | "quarts" => Some("qt"),
            "pt" | "pint" | "pints" => Some("pt"),
            "fl_oz" | "fl oz" | "floz" | "fluid ounce" | "fluid ounces" => Some("fl_oz"),
            _ => None,
        },
        UnitCategory::Mass => match trimmed {
            "g" | "gram" | "grams" => Some("g"),
            "kg" | "kilogram" | "kilograms" => Some("kg"),
            "mg" | "milligram" | "milligrams" => Some("mg"),
            "oz" | "ounce" | "ounces" => Some("oz"),
            "lb" | "lbs" | "pound" | "pounds" => Some("lb"),
            _ => None,
        },
    }
}

/// Get the conversion factor to litres for a canonical volume unit
pub fn litres_per_unit(unit: &str) -> Option<f64> {
    match canonical_unit(unit, UnitCategory::Volume)? {
        "l" => Some(1.0),
        "ml" => Some(L_PER_ML),
        "gal" => Some(L_PER_US_GALLON),
        "imp_gal" => Some(L_PER_IMP_GALLON),
        "qt" => Some(L_PER_US_QUART),
        "pt" => Some(L_PER_US_PINT),
        "fl_oz" => Some(L_PER_US_FL_OZ),
        _ => None,
    }
}

/// Get the conversion factor to grams for a mass unit
pub fn grams_per_unit(unit: &str) -> Option<f64> {
    match canonical_unit(unit, UnitCategory::Mass)? {
        "g" => Some(1.0),
        "kg" => Some(G_PER_KG),
        "mg" => Some(G_PER_MG),
        "oz" => Some(G_PER_OZ),
        "lb" => Some(G_PER_LB),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_volume_units() {
        assert_eq!(canonical_unit("Litres", UnitCategory::Volume), Some("l"));
        assert_eq!(canonical_unit(" L ", UnitCategory::Volume), Some("l"));
        assert_eq!(canonical_unit("gallon", UnitCategory::Volume), Some("gal"));
        assert_eq!(canonical_unit("fl oz", UnitCategory::Volume), Some("fl_oz"));
        assert_eq!(canonical_unit("g", UnitCategory::Volume), None);
    }

    #[test]
    fn test_canonical_scales() {
        assert_eq!(canonical_unit("°F", UnitCategory::Temperature), Some("f"));
        assert_eq!(canonical_unit("Celsius", UnitCategory::Temperature), Some("c"));
        assert_eq!(canonical_unit("Specific Gravity", UnitCategory::Density), Some("sg"));
        assert_eq!(canonical_unit("°Bx", UnitCategory::Density), Some("brix"));
        assert_eq!(canonical_unit("oechsle", UnitCategory::Density), Some("oe"));
        assert_eq!(canonical_unit("rankine", UnitCategory::Temperature), None);
    }

    #[test]
    fn test_litres_per_unit() {
        assert_eq!(litres_per_unit("l"), Some(1.0));
        assert_eq!(litres_per_unit("ml"), Some(L_PER_ML));
        assert_eq!(litres_per_unit("gallons"), Some(L_PER_US_GALLON));
        assert_eq!(litres_per_unit("kg"), None);
    }

    #[test]
    fn test_grams_per_unit() {
        assert_eq!(grams_per_unit("g"), Some(1.0));
        assert_eq!(grams_per_unit("lbs"), Some(G_PER_LB));
        assert_eq!(grams_per_unit("ml"), None);
    }

    #[test]
    fn test_temperature_scale_round_trip_points() {
        assert!((TempScale::Fahrenheit.to_celsius(68.0) - 20.0).abs() < 1e-9);
        assert!((TempScale::Fahrenheit.from_celsius(100.0) - 212.0).abs() < 1e-9);
        assert!((TempScale::Kelvin.to_celsius(273.15)).abs() < 1e-9);
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!(UnitCategory::from_str("Volume"), Some(UnitCategory::Volume));
        assert_eq!(UnitCategory::from_str("weight"), Some(UnitCategory::Mass));
        assert_eq!(UnitCategory::from_str("length"), None);
    }
}
