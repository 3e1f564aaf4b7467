//! Unit conversion service
//!
//! The calculators only talk to [`ConversionService`]; [`StandardConverter`]
//! is the implementation wired into the server.

use thiserror::Error;

use super::units::{canonical_unit, grams_per_unit, litres_per_unit, DensityScale, TempScale, UnitCategory};

/// Conversion error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("Unknown {category} unit: '{unit}'")]
    UnknownUnit { unit: String, category: UnitCategory },

    #[error("Unknown scale: '{0}'")]
    UnknownScale(String),
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Unit and density normalisation used by the fermentation calculators
pub trait ConversionService {
    /// Convert `value` between two units of the same category
    fn convert(
        &self,
        value: f64,
        from_unit: &str,
        to_unit: &str,
        category: UnitCategory,
    ) -> ConversionResult<f64>;

    /// Resolve an alias (e.g. "Litres", "°F") to its canonical unit key
    fn normalise_unit(&self, unit: &str, category: UnitCategory) -> ConversionResult<String>;

    /// Correct a density reading taken at `sample_temp` to the instrument's
    /// calibration temperature. The result is in the same `density_scale`.
    fn density_correction(
        &self,
        reading: f64,
        sample_temp: f64,
        calib_temp: f64,
        temp_scale: &str,
        density_scale: &str,
    ) -> ConversionResult<f64>;
}

/// Standard brewing conversions: metric/US/imperial volumes and masses,
/// c/f/k temperatures, sg/brix/plato/oe density scales and the cubic
/// hydrometer temperature correction.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardConverter;

impl StandardConverter {
    pub fn new() -> Self {
        Self
    }
}

fn unknown_unit(unit: &str, category: UnitCategory) -> ConversionError {
    ConversionError::UnknownUnit {
        unit: unit.to_string(),
        category,
    }
}

fn temp_scale(unit: &str) -> ConversionResult<TempScale> {
    TempScale::from_str(unit).ok_or_else(|| unknown_unit(unit, UnitCategory::Temperature))
}

fn density_scale(unit: &str) -> ConversionResult<DensityScale> {
    DensityScale::from_str(unit).ok_or_else(|| unknown_unit(unit, UnitCategory::Density))
}

// ============================================================================
// Density scale formulas
// ============================================================================

/// Convert degrees Brix or Plato to specific gravity
fn extract_to_sg(degrees: f64) -> f64 {
    1.0 + degrees / (258.6 - (degrees / 258.2) * 227.1)
}

fn sg_to_brix(sg: f64) -> f64 {
    ((182.4601 * sg - 775.6821) * sg + 1262.7794) * sg - 669.5622
}

fn sg_to_plato(sg: f64) -> f64 {
    -616.868 + 1111.14 * sg - 630.272 * sg.powi(2) + 135.997 * sg.powi(3)
}

/// Convert a reading on any density scale to specific gravity
pub fn to_sg(value: f64, scale: DensityScale) -> f64 {
    match scale {
        DensityScale::Sg => value,
        DensityScale::Brix | DensityScale::Plato => extract_to_sg(value),
        DensityScale::Oe => 1.0 + value / 1000.0,
    }
}

/// Convert a specific gravity into any density scale
pub fn from_sg(sg: f64, scale: DensityScale) -> f64 {
    match scale {
        DensityScale::Sg => sg,
        DensityScale::Brix => sg_to_brix(sg),
        DensityScale::Plato => sg_to_plato(sg),
        DensityScale::Oe => (sg - 1.0) * 1000.0,
    }
}

/// Hydrometer correction polynomial, temperature in °F
fn hydrometer_factor(temp_f: f64) -> f64 {
    1.00130346 - 0.000134722124 * temp_f + 0.00000204052596 * temp_f.powi(2)
        - 0.00000000232820948 * temp_f.powi(3)
}

impl ConversionService for StandardConverter {
    fn convert(
        &self,
        value: f64,
        from_unit: &str,
        to_unit: &str,
        category: UnitCategory,
    ) -> ConversionResult<f64> {
        match category {
            UnitCategory::Temperature => {
                let from = temp_scale(from_unit)?;
                let to = temp_scale(to_unit)?;
                if from == to {
                    return Ok(value);
                }
                Ok(to.from_celsius(from.to_celsius(value)))
            }
            UnitCategory::Density => {
                let from = density_scale(from_unit)?;
                let to = density_scale(to_unit)?;
                if from == to {
                    return Ok(value);
                }
                Ok(from_sg(to_sg(value, from), to))
            }
            UnitCategory::Volume => {
                let from = litres_per_unit(from_unit).ok_or_else(|| unknown_unit(from_unit, category))?;
                let to = litres_per_unit(to_unit).ok_or_else(|| unknown_unit(to_unit, category))?;
                if from == to {
                    return Ok(value);
                }
                Ok(value * from / to)
            }
            UnitCategory::Mass => {
                let from = grams_per_unit(from_unit).ok_or_else(|| unknown_unit(from_unit, category))?;
                let to = grams_per_unit(to_unit).ok_or_else(|| unknown_unit(to_unit, category))?;
                if from == to {
                    return Ok(value);
                }
                Ok(value * from / to)
            }
        }
    }

    fn normalise_unit(&self, unit: &str, category: UnitCategory) -> ConversionResult<String> {
        canonical_unit(unit, category)
            .map(str::to_string)
            .ok_or_else(|| unknown_unit(unit, category))
    }

    fn density_correction(
        &self,
        reading: f64,
        sample_temp: f64,
        calib_temp: f64,
        temp_scale: &str,
        density_scale: &str,
    ) -> ConversionResult<f64> {
        let temps = TempScale::from_str(temp_scale)
            .ok_or_else(|| ConversionError::UnknownScale(temp_scale.to_string()))?;
        let scale = DensityScale::from_str(density_scale)
            .ok_or_else(|| ConversionError::UnknownScale(density_scale.to_string()))?;

        if sample_temp == calib_temp {
            return Ok(reading);
        }

        let sample_f = TempScale::Fahrenheit.from_celsius(temps.to_celsius(sample_temp));
        let calib_f = TempScale::Fahrenheit.from_celsius(temps.to_celsius(calib_temp));

        let sg = to_sg(reading, scale);
        let corrected = sg * hydrometer_factor(sample_f) / hydrometer_factor(calib_f);

        tracing::debug!(
            reading,
            sample_f,
            calib_f,
            corrected_sg = corrected,
            "Applied hydrometer temperature correction"
        );

        Ok(from_sg(corrected, scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conv() -> StandardConverter {
        StandardConverter::new()
    }

    #[test]
    fn test_convert_volume() {
        let litres = conv().convert(5.0, "gal", "l", UnitCategory::Volume).unwrap();
        assert!((litres - 18.92706).abs() < 0.0001);

        let ml = conv().convert(1.5, "L", "ml", UnitCategory::Volume).unwrap();
        assert!((ml - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn test_convert_temperature() {
        let c = conv().convert(68.0, "f", "c", UnitCategory::Temperature).unwrap();
        assert!((c - 20.0).abs() < 1e-9);

        let same = conv().convert(21.3, "celsius", "c", UnitCategory::Temperature).unwrap();
        assert_eq!(same, 21.3);
    }

    #[test]
    fn test_convert_density_scales() {
        let sg = conv().convert(12.0, "brix", "sg", UnitCategory::Density).unwrap();
        assert!((sg - 1.04838).abs() < 0.0001);

        let oe = conv().convert(1.080, "sg", "oe", UnitCategory::Density).unwrap();
        assert!((oe - 80.0).abs() < 1e-9);

        let plato = conv().convert(1.048378, "sg", "plato", UnitCategory::Density).unwrap();
        assert!((plato - 12.0).abs() < 0.01);
    }

    #[test]
    fn test_convert_sg_identity_is_exact() {
        let sg = conv().convert(1.050, "sg", "sg", UnitCategory::Density).unwrap();
        assert_eq!(sg, 1.050);
    }

    #[test]
    fn test_convert_unknown_unit() {
        let err = conv().convert(1.0, "hogshead", "l", UnitCategory::Volume).unwrap_err();
        assert_eq!(
            err,
            ConversionError::UnknownUnit {
                unit: "hogshead".to_string(),
                category: UnitCategory::Volume,
            }
        );

        // a valid unit in the wrong category is still unknown
        assert!(conv().convert(1.0, "g", "l", UnitCategory::Volume).is_err());
    }

    #[test]
    fn test_normalise_unit() {
        assert_eq!(conv().normalise_unit("Litres", UnitCategory::Volume).unwrap(), "l");
        assert_eq!(conv().normalise_unit("°F", UnitCategory::Temperature).unwrap(), "f");
        assert!(conv().normalise_unit("furlong", UnitCategory::Volume).is_err());
    }

    #[test]
    fn test_density_correction_same_temperature() {
        let corrected = conv().density_correction(1.050, 20.0, 20.0, "c", "sg").unwrap();
        assert_eq!(corrected, 1.050);
    }

    #[test]
    fn test_density_correction_warm_sample_reads_low() {
        // 1.050 read at 30°C against a 20°C hydrometer
        let corrected = conv().density_correction(1.050, 30.0, 20.0, "c", "sg").unwrap();
        assert!((corrected - 1.052604).abs() < 0.00001);

        let cold = conv().density_correction(1.050, 10.0, 20.0, "c", "sg").unwrap();
        assert!(cold < 1.050);
    }

    #[test]
    fn test_density_correction_fahrenheit_matches_celsius() {
        let c = conv().density_correction(1.050, 30.0, 20.0, "c", "sg").unwrap();
        let f = conv().density_correction(1.050, 86.0, 68.0, "f", "sg").unwrap();
        assert!((c - f).abs() < 1e-9);
    }

    #[test]
    fn test_density_correction_keeps_scale() {
        let corrected = conv().density_correction(12.0, 30.0, 20.0, "c", "brix").unwrap();
        assert!((corrected - 12.619).abs() < 0.01);
    }

    #[test]
    fn test_density_correction_unknown_scale() {
        let err = conv().density_correction(1.050, 30.0, 20.0, "c", "baume").unwrap_err();
        assert_eq!(err, ConversionError::UnknownScale("baume".to_string()));

        let err = conv().density_correction(1.050, 30.0, 20.0, "r", "sg").unwrap_err();
        assert_eq!(err, ConversionError::UnknownScale("r".to_string()));
    }
}
