//! ABV MCP Tools
//!
//! Alcohol strength calculations and gravity correction.

use serde::Serialize;

use crate::calc::{self, AbvConfig, FORMULAS};
use crate::convert::{ConversionService, DensityScale};

use super::round_to;

/// ABW is roughly ABV scaled by ethanol's specific gravity
pub const ABW_PER_ABV: f64 = 0.79;
/// US proof per percent ABV
pub const US_PROOF_PER_ABV: f64 = 2.0;
/// UK proof per percent ABV
pub const UK_PROOF_PER_ABV: f64 = 1.75;

/// An ABV figure re-expressed for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Strength {
    pub abv: f64,
    pub abw: f64,
    pub us_proof: f64,
    pub uk_proof: f64,
}

impl Strength {
    pub fn from_abv(abv: f64) -> Self {
        Self {
            abv,
            abw: abv * ABW_PER_ABV,
            us_proof: abv * US_PROOF_PER_ABV,
            uk_proof: abv * UK_PROOF_PER_ABV,
        }
    }

    fn rounded(&self) -> Self {
        Self {
            abv: round_to(self.abv, 2),
            abw: round_to(self.abw, 2),
            us_proof: round_to(self.us_proof, 1),
            uk_proof: round_to(self.uk_proof, 1),
        }
    }
}

/// Response for compute_abv
#[derive(Debug, Serialize)]
pub struct ComputeAbvResponse {
    pub formula: String,
    pub formula_label: String,
    pub original_sg: f64,
    pub final_sg: f64,
    pub strength: Strength,
    pub computed_at: String,
}

/// Summary of a registered formula
#[derive(Debug, Serialize)]
pub struct FormulaSummary {
    pub id: &'static str,
    pub label: &'static str,
}

/// Response for list_abv_formulas
#[derive(Debug, Serialize)]
pub struct ListFormulasResponse {
    pub formulas: Vec<FormulaSummary>,
    pub default: &'static str,
}

/// Response for correct_gravity
#[derive(Debug, Serialize)]
pub struct CorrectGravityResponse {
    pub reading: f64,
    pub corrected: f64,
    pub density_scale: String,
    pub corrected_sg: f64,
}

pub fn compute_abv<C: ConversionService + ?Sized>(
    converter: &C,
    config: AbvConfig,
) -> Result<ComputeAbvResponse, String> {
    let breakdown = calc::compute_abv_breakdown(&config, converter).map_err(|e| e.to_string())?;

    Ok(ComputeAbvResponse {
        formula: breakdown.formula.id().to_string(),
        formula_label: breakdown.formula.label().to_string(),
        original_sg: round_to(breakdown.gravity.original_sg, 4),
        final_sg: round_to(breakdown.gravity.final_sg, 4),
        strength: Strength::from_abv(breakdown.abv).rounded(),
        computed_at: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
    })
}

pub fn list_abv_formulas() -> ListFormulasResponse {
    ListFormulasResponse {
        formulas: FORMULAS
            .iter()
            .map(|f| FormulaSummary {
                id: f.id(),
                label: f.label(),
            })
            .collect(),
        default: calc::defaults::DEFAULT_FORMULA,
    }
}

pub fn correct_gravity<C: ConversionService + ?Sized>(
    converter: &C,
    reading: f64,
    sample_temp: f64,
    calibration_temp: f64,
    temp_scale: &str,
    density_scale: &str,
) -> Result<CorrectGravityResponse, String> {
    let scale = DensityScale::from_str(density_scale)
        .ok_or_else(|| format!("Unknown density scale: '{}'", density_scale))?;

    let corrected = converter
        .density_correction(reading, sample_temp, calibration_temp, temp_scale, density_scale)
        .map_err(|e| e.to_string())?;
    let corrected_sg = converter
        .convert(corrected, density_scale, "sg", crate::convert::UnitCategory::Density)
        .map_err(|e| e.to_string())?;

    Ok(CorrectGravityResponse {
        reading,
        corrected: round_to(corrected, 4),
        density_scale: scale.as_str().to_string(),
        corrected_sg: round_to(corrected_sg, 4),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::StandardConverter;

    #[test]
    fn test_strength_multipliers() {
        let s = Strength::from_abv(5.0);
        assert!((s.abw - 3.95).abs() < 1e-9);
        assert_eq!(s.us_proof, 10.0);
        assert_eq!(s.uk_proof, 8.75);
    }

    #[test]
    fn test_compute_abv_response() {
        let resp = compute_abv(&StandardConverter, AbvConfig::new(1.050, 1.010)).unwrap();
        assert_eq!(resp.formula, "abv-basic");
        assert_eq!(resp.strength.abv, 5.25);
        assert_eq!(resp.strength.us_proof, 10.5);
        assert_eq!(resp.original_sg, 1.05);
    }

    #[test]
    fn test_compute_abv_unknown_formula_message() {
        let err = compute_abv(&StandardConverter, AbvConfig::new(1.050, 1.010).with_formula("nope"))
            .unwrap_err();
        assert!(err.contains("'nope'"));
        assert!(err.contains("abv-hmrc"));
    }

    #[test]
    fn test_list_formulas() {
        let resp = list_abv_formulas();
        assert_eq!(resp.formulas.len(), 4);
        assert_eq!(resp.default, "abv-basic");
    }

    #[test]
    fn test_correct_gravity() {
        let resp = correct_gravity(&StandardConverter, 1.050, 30.0, 20.0, "c", "sg").unwrap();
        assert_eq!(resp.corrected, 1.0526);
        assert_eq!(resp.corrected_sg, 1.0526);

        assert!(correct_gravity(&StandardConverter, 1.050, 30.0, 20.0, "c", "baume").is_err());
    }

    #[test]
    fn test_compute_abv_reports_conversion_error_first() {
        let config = AbvConfig::new(1.050, 1.010)
            .with_density_scale("baume")
            .with_formula("nope");
        let err = compute_abv(&StandardConverter, config).unwrap_err();
        assert!(err.contains("baume"));
    }
}
