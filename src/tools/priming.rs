//! Priming MCP Tools
//!
//! Priming sugar dosing and the sugar reference table.

use serde::Serialize;

use crate::calc::{self, PrimingConfig, SugarProfile, SUGAR_PROFILES};
use crate::convert::ConversionService;

use super::round_to;

/// Response for compute_priming
#[derive(Debug, Serialize)]
pub struct ComputePrimingResponse {
    /// Sugar whose table values were used (dextrose for unknown types)
    pub sugar_type: &'static str,
    pub volume_l: f64,
    pub temp_c: f64,
    pub residual_co2: f64,
    pub additional_co2: f64,
    pub mass_g: f64,
    pub volume_ml: f64,
    pub delta_sg: f64,
    pub new_volume_l: f64,
}

/// Response for list_sugar_types
#[derive(Debug, Serialize)]
pub struct ListSugarTypesResponse {
    pub sugars: Vec<SugarProfile>,
    pub default: &'static str,
    pub fallback: &'static str,
}

pub fn compute_priming<C: ConversionService + ?Sized>(
    converter: &C,
    config: PrimingConfig,
) -> Result<ComputePrimingResponse, String> {
    let breakdown = calc::compute_priming_breakdown(&config, converter).map_err(|e| e.to_string())?;
    let result = breakdown.result;

    Ok(ComputePrimingResponse {
        sugar_type: breakdown.sugar.sugar_type,
        volume_l: round_to(breakdown.volume_l, 3),
        temp_c: round_to(breakdown.temp_c, 1),
        residual_co2: round_to(breakdown.residual_co2, 3),
        additional_co2: round_to(breakdown.additional_co2, 3),
        mass_g: round_to(result.mass_g, 1),
        volume_ml: round_to(result.volume_ml, 1),
        delta_sg: round_to(result.delta_sg, 4),
        new_volume_l: round_to(result.new_volume_l, 3),
    })
}

pub fn list_sugar_types() -> ListSugarTypesResponse {
    ListSugarTypesResponse {
        sugars: SUGAR_PROFILES.to_vec(),
        default: calc::defaults::DEFAULT_SUGAR_TYPE,
        fallback: calc::defaults::DEXTROSE.name,
    }
}
