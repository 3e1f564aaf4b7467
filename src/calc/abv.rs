//! ABV calculator
//!
//! Temperature-corrects both gravity readings, normalises them to specific
//! gravity and hands them to the selected formula.

use serde::{Deserialize, Serialize};

use super::defaults::{
    DEFAULT_CALIBRATION_TEMP, DEFAULT_DENSITY_SCALE, DEFAULT_FORMULA, DEFAULT_TEMP_SCALE,
};
use super::error::CalcResult;
use super::formulas::{self, AbvFormula};
use crate::convert::{ConversionService, UnitCategory};

/// Inputs for an ABV calculation
///
/// Defaults: `density_scale = "sg"`, `temp_scale = "c"`,
/// `calibration_temp = 20.0`, `formula = "abv-basic"`. Missing sample
/// temperatures mean the reading was taken at the calibration temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbvConfig {
    pub original_reading: f64,
    pub final_reading: f64,
    #[serde(default = "default_density_scale")]
    pub density_scale: String,
    #[serde(default = "default_temp_scale")]
    pub temp_scale: String,
    #[serde(default = "default_calibration_temp")]
    pub calibration_temp: f64,
    #[serde(default = "default_formula")]
    pub formula: String,
    #[serde(default)]
    pub original_temp: Option<f64>,
    #[serde(default)]
    pub final_temp: Option<f64>,
}

fn default_density_scale() -> String {
    DEFAULT_DENSITY_SCALE.to_string()
}

fn default_temp_scale() -> String {
    DEFAULT_TEMP_SCALE.to_string()
}

fn default_calibration_temp() -> f64 {
    DEFAULT_CALIBRATION_TEMP
}

fn default_formula() -> String {
    DEFAULT_FORMULA.to_string()
}

impl AbvConfig {
    /// Config for two readings with every other field at its default
    pub fn new(original_reading: f64, final_reading: f64) -> Self {
        Self {
            original_reading,
            final_reading,
            density_scale: default_density_scale(),
            temp_scale: default_temp_scale(),
            calibration_temp: DEFAULT_CALIBRATION_TEMP,
            formula: default_formula(),
            original_temp: None,
            final_temp: None,
        }
    }

    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = formula.into();
        self
    }

    pub fn with_density_scale(mut self, scale: impl Into<String>) -> Self {
        self.density_scale = scale.into();
        self
    }

    pub fn with_temperatures(mut self, original_temp: f64, final_temp: f64) -> Self {
        self.original_temp = Some(original_temp);
        self.final_temp = Some(final_temp);
        self
    }

    /// Sample temperature of the original reading
    pub fn original_temp(&self) -> f64 {
        self.original_temp.unwrap_or(self.calibration_temp)
    }

    /// Sample temperature of the final reading
    pub fn final_temp(&self) -> f64 {
        self.final_temp.unwrap_or(self.calibration_temp)
    }
}

/// Both readings after temperature correction and SG normalisation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GravityPair {
    pub original_sg: f64,
    pub final_sg: f64,
}

/// Temperature-correct both readings and convert them to specific gravity
pub fn normalise_readings<C: ConversionService + ?Sized>(
    config: &AbvConfig,
    converter: &C,
) -> CalcResult<GravityPair> {
    let original = converter.density_correction(
        config.original_reading,
        config.original_temp(),
        config.calibration_temp,
        &config.temp_scale,
        &config.density_scale,
    )?;
    let final_reading = converter.density_correction(
        config.final_reading,
        config.final_temp(),
        config.calibration_temp,
        &config.temp_scale,
        &config.density_scale,
    )?;

    let original_sg = converter.convert(original, &config.density_scale, "sg", UnitCategory::Density)?;
    let final_sg = converter.convert(final_reading, &config.density_scale, "sg", UnitCategory::Density)?;

    Ok(GravityPair {
        original_sg,
        final_sg,
    })
}

/// Result of one ABV calculation with the values the formula saw
#[derive(Debug, Clone, Copy)]
pub struct AbvBreakdown {
    pub formula: &'static dyn AbvFormula,
    pub gravity: GravityPair,
    pub abv: f64,
}

/// Run the ABV calculation, keeping the normalised gravities and formula
pub fn compute_abv_breakdown<C: ConversionService + ?Sized>(
    config: &AbvConfig,
    converter: &C,
) -> CalcResult<AbvBreakdown> {
    let gravity = normalise_readings(config, converter)?;
    let formula = formulas::lookup(&config.formula)?;
    let abv = formula.compute(gravity.original_sg, gravity.final_sg);

    tracing::debug!(
        formula = formula.id(),
        original_sg = gravity.original_sg,
        final_sg = gravity.final_sg,
        abv,
        "Computed ABV"
    );

    Ok(AbvBreakdown {
        formula,
        gravity,
        abv,
    })
}

/// Compute the ABV percentage for a pair of gravity readings
pub fn compute_abv<C: ConversionService + ?Sized>(config: &AbvConfig, converter: &C) -> CalcResult<f64> {
    compute_abv_breakdown(config, converter).map(|b| b.abv)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::calc::CalcError;
    use crate::convert::{ConversionError, ConversionResult, StandardConverter};

    /// Converter stub that records every call and passes values through
    #[derive(Default)]
    struct RecordingConverter {
        calls: RefCell<Vec<String>>,
    }

    impl ConversionService for RecordingConverter {
        fn convert(&self, value: f64, from: &str, to: &str, category: UnitCategory) -> ConversionResult<f64> {
            self.calls.borrow_mut().push(format!("convert {} {}->{} {}", value, from, to, category));
            Ok(value)
        }

        fn normalise_unit(&self, unit: &str, _category: UnitCategory) -> ConversionResult<String> {
            Ok(unit.to_string())
        }

        fn density_correction(
            &self,
            reading: f64,
            sample_temp: f64,
            calib_temp: f64,
            _temp_scale: &str,
            _density_scale: &str,
        ) -> ConversionResult<f64> {
            self.calls
                .borrow_mut()
                .push(format!("correct {} {}->{}", reading, sample_temp, calib_temp));
            Ok(reading)
        }
    }

    /// Converter stub that rejects everything
    struct FailingConverter;

    impl ConversionService for FailingConverter {
        fn convert(&self, _: f64, from: &str, _: &str, category: UnitCategory) -> ConversionResult<f64> {
            Err(ConversionError::UnknownUnit {
                unit: from.to_string(),
                category,
            })
        }

        fn normalise_unit(&self, unit: &str, category: UnitCategory) -> ConversionResult<String> {
            Err(ConversionError::UnknownUnit {
                unit: unit.to_string(),
                category,
            })
        }

        fn density_correction(&self, _: f64, _: f64, _: f64, temp_scale: &str, _: &str) -> ConversionResult<f64> {
            Err(ConversionError::UnknownScale(temp_scale.to_string()))
        }
    }

    #[test]
    fn test_basic_abv() {
        let config = AbvConfig::new(1.050, 1.010);
        let abv = compute_abv(&config, &StandardConverter).unwrap();
        assert!((abv - 5.25).abs() < 1e-9);
    }

    #[test]
    fn test_defaults_from_json() {
        let config: AbvConfig =
            serde_json::from_str(r#"{"original_reading": 1.050, "final_reading": 1.010}"#).unwrap();
        assert_eq!(config, AbvConfig::new(1.050, 1.010));
        assert_eq!(config.original_temp(), 20.0);
        assert_eq!(config.final_temp(), 20.0);
    }

    #[test]
    fn test_steps_run_in_order() {
        let stub = RecordingConverter::default();
        let config = AbvConfig::new(1.060, 1.012).with_temperatures(25.0, 18.0);
        compute_abv(&config, &stub).unwrap();

        let calls = stub.calls.borrow();
        assert_eq!(
            *calls,
            vec![
                "correct 1.06 25->20".to_string(),
                "correct 1.012 18->20".to_string(),
                "convert 1.06 sg->sg density".to_string(),
                "convert 1.012 sg->sg density".to_string(),
            ]
        );
    }

    #[test]
    fn test_brix_readings_are_converted_before_formula() {
        let config = AbvConfig::new(12.0, 2.0).with_density_scale("brix");
        let abv = compute_abv(&config, &StandardConverter).unwrap();

        let og = crate::convert::to_sg(12.0, crate::convert::DensityScale::Brix);
        let fg = crate::convert::to_sg(2.0, crate::convert::DensityScale::Brix);
        assert!((abv - (og - fg) * 131.25).abs() < 1e-9);
    }

    #[test]
    fn test_temperature_correction_raises_warm_reading() {
        let cold = compute_abv(&AbvConfig::new(1.050, 1.010), &StandardConverter).unwrap();
        let warm_og = AbvConfig::new(1.050, 1.010).with_temperatures(30.0, 20.0);
        let warm = compute_abv(&warm_og, &StandardConverter).unwrap();
        assert!(warm > cold);
    }

    #[test]
    fn test_each_formula_is_selectable() {
        for id in formulas::formula_ids() {
            let config = AbvConfig::new(1.050, 1.010).with_formula(id);
            let abv = compute_abv(&config, &StandardConverter).unwrap();
            assert!(abv > 5.0 && abv < 5.6, "{} gave {}", id, abv);
        }
    }

    #[test]
    fn test_unknown_formula() {
        let config = AbvConfig::new(1.050, 1.010).with_formula("abv-guess");
        let err = compute_abv(&config, &StandardConverter).unwrap_err();
        assert!(matches!(err, CalcError::InvalidFormula { ref id, .. } if id == "abv-guess"));
        assert!(err.to_string().contains("abv-guess"));
    }

    #[test]
    fn test_conversion_errors_propagate() {
        let err = compute_abv(&AbvConfig::new(1.050, 1.010), &FailingConverter).unwrap_err();
        assert_eq!(err, CalcError::Conversion(ConversionError::UnknownScale("c".to_string())));

        let config = AbvConfig::new(1.050, 1.010).with_density_scale("baume");
        let err = compute_abv(&config, &StandardConverter).unwrap_err();
        assert!(matches!(err, CalcError::Conversion(ConversionError::UnknownScale(_))));
    }

    #[test]
    fn test_identical_configs_give_identical_results() {
        let config = AbvConfig::new(1.072, 1.014).with_formula("abv-hall").with_temperatures(24.0, 17.0);
        let a = compute_abv(&config, &StandardConverter).unwrap();
        let b = compute_abv(&config, &StandardConverter).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_conversion_error_reported_before_unknown_formula() {
        let config = AbvConfig::new(1.050, 1.010)
            .with_density_scale("baume")
            .with_formula("abv-guess");
        let err = compute_abv(&config, &StandardConverter).unwrap_err();
        assert!(matches!(err, CalcError::Conversion(_)));
    }

    #[test]
    fn test_breakdown_runs_the_pipeline_once() {
        let stub = RecordingConverter::default();
        let config = AbvConfig::new(1.060, 1.012).with_formula("abv-berry");
        let breakdown = compute_abv_breakdown(&config, &stub).unwrap();

        assert_eq!(stub.calls.borrow().len(), 4);
        assert_eq!(breakdown.formula.id(), "abv-berry");
        assert_eq!(breakdown.gravity.original_sg, 1.060);
        assert_eq!(breakdown.abv, compute_abv(&config, &stub).unwrap());
    }
}
