//! Priming sugar calculator
//!
//! Works out how much sugar a sealed beverage needs to reach a carbonation
//! target, given the CO2 it already holds at its current temperature.

use serde::{Deserialize, Serialize};

use super::defaults::{
    sugar_profile, SugarProfile, DEFAULT_BEVERAGE_TEMP, DEFAULT_SUGAR_TYPE, DEFAULT_TEMP_SCALE,
    DEFAULT_VOLUME_UNIT, DEFAULT_VOL_CO2, DEXTROSE, GRAMS_PER_LITRE_PER_VOLUME, RESIDUAL_CO2_A,
    RESIDUAL_CO2_B, RESIDUAL_CO2_C, SG_PER_GRAM_PER_LITRE,
};
use super::error::{CalcError, CalcResult};
use crate::convert::{ConversionService, UnitCategory};

/// Inputs for a priming calculation
///
/// Defaults: `volume_unit = "l"`, `beverage_temp = 20.0`, `temp_scale = "c"`,
/// `desired_vol_co2 = 2.0`, `sugar_type = "dextrose"`. The optional
/// overrides take precedence over the sugar type's table values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimingConfig {
    pub beverage_volume: f64,
    #[serde(default = "default_volume_unit")]
    pub volume_unit: String,
    #[serde(default = "default_beverage_temp")]
    pub beverage_temp: f64,
    #[serde(default = "default_temp_scale")]
    pub temp_scale: String,
    #[serde(default = "default_vol_co2")]
    pub desired_vol_co2: f64,
    #[serde(default = "default_sugar_type")]
    pub sugar_type: String,
    /// Sugar density in g/L
    #[serde(default)]
    pub sugar_density: Option<f64>,
    #[serde(default)]
    pub fermentable_fraction: Option<f64>,
    /// Grams per litre per volume of CO2, replacing the computed factor
    #[serde(default)]
    pub custom_factor: Option<f64>,
}

fn default_volume_unit() -> String {
    DEFAULT_VOLUME_UNIT.to_string()
}

fn default_beverage_temp() -> f64 {
    DEFAULT_BEVERAGE_TEMP
}

fn default_temp_scale() -> String {
    DEFAULT_TEMP_SCALE.to_string()
}

fn default_vol_co2() -> f64 {
    DEFAULT_VOL_CO2
}

fn default_sugar_type() -> String {
    DEFAULT_SUGAR_TYPE.to_string()
}

impl PrimingConfig {
    /// Config for a volume in litres with every other field at its default
    pub fn new(beverage_volume: f64) -> Self {
        Self {
            beverage_volume,
            volume_unit: default_volume_unit(),
            beverage_temp: DEFAULT_BEVERAGE_TEMP,
            temp_scale: default_temp_scale(),
            desired_vol_co2: DEFAULT_VOL_CO2,
            sugar_type: default_sugar_type(),
            sugar_density: None,
            fermentable_fraction: None,
            custom_factor: None,
        }
    }

    pub fn with_volume_unit(mut self, unit: impl Into<String>) -> Self {
        self.volume_unit = unit.into();
        self
    }

    pub fn with_temperature(mut self, temp: f64, scale: impl Into<String>) -> Self {
        self.beverage_temp = temp;
        self.temp_scale = scale.into();
        self
    }

    pub fn with_vol_co2(mut self, vol_co2: f64) -> Self {
        self.desired_vol_co2 = vol_co2;
        self
    }

    pub fn with_sugar(mut self, sugar_type: impl Into<String>) -> Self {
        self.sugar_type = sugar_type.into();
        self
    }
}

/// Priming dose and its effect on the beverage
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrimingResult {
    pub mass_g: f64,
    pub volume_ml: f64,
    pub delta_sg: f64,
    pub new_volume_l: f64,
}

/// Sugar properties after applying overrides to the table values
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedSugar {
    /// Table entry the defaults came from (dextrose for unknown types)
    pub sugar_type: &'static str,
    /// Grams per litre per volume of CO2
    pub factor: f64,
    /// None when an explicit density override is unusable
    pub density_g_per_l: Option<f64>,
}

/// Every intermediate figure of one priming calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrimingBreakdown {
    pub volume_l: f64,
    pub temp_c: f64,
    pub residual_co2: f64,
    pub additional_co2: f64,
    pub sugar: ResolvedSugar,
    pub result: PrimingResult,
}

/// CO2 volumes already dissolved at `temp_c` degrees Celsius
pub fn residual_co2(temp_c: f64) -> f64 {
    RESIDUAL_CO2_A + RESIDUAL_CO2_B * temp_c + RESIDUAL_CO2_C * temp_c * temp_c
}

/// CO2 volumes the priming sugar has to produce, never negative
pub fn additional_co2(desired_vol_co2: f64, temp_c: f64) -> f64 {
    (desired_vol_co2 - residual_co2(temp_c)).max(0.0)
}

/// Table profile for a sugar type, dextrose when the type is unknown
pub fn profile_or_default(sugar_type: &str) -> &'static SugarProfile {
    sugar_profile(sugar_type).unwrap_or_else(|| {
        tracing::warn!(
            "Unknown sugar type '{}', using dextrose properties",
            sugar_type
        );
        &DEXTROSE
    })
}

/// Apply the config's overrides on top of the sugar table
///
/// `fermentable_fraction` must lie in (0, 1] and `custom_factor` must be a
/// positive finite number.
pub fn resolve_sugar(config: &PrimingConfig) -> CalcResult<ResolvedSugar> {
    let profile = profile_or_default(&config.sugar_type);

    let factor = match config.custom_factor {
        Some(factor) if factor.is_finite() && factor > 0.0 => factor,
        Some(factor) => {
            return Err(CalcError::InvalidSugarOverride {
                field: "custom_factor",
                value: factor,
            })
        }
        None => {
            let fraction = match config.fermentable_fraction {
                Some(fraction) if fraction > 0.0 && fraction <= 1.0 => fraction,
                Some(fraction) => {
                    return Err(CalcError::InvalidSugarOverride {
                        field: "fermentable_fraction",
                        value: fraction,
                    })
                }
                None => profile.fermentable_fraction,
            };
            GRAMS_PER_LITRE_PER_VOLUME * fraction
        }
    };

    let density_g_per_l = match config.sugar_density {
        Some(density) if density.is_finite() && density > 0.0 => Some(density),
        Some(_) => None,
        None => Some(profile.density_g_per_l),
    };

    Ok(ResolvedSugar {
        sugar_type: profile.name,
        factor,
        density_g_per_l,
    })
}

/// Run the priming calculation, keeping the intermediate figures
pub fn compute_priming_breakdown<C: ConversionService + ?Sized>(
    config: &PrimingConfig,
    converter: &C,
) -> CalcResult<PrimingBreakdown> {
    let volume_unit = converter.normalise_unit(&config.volume_unit, UnitCategory::Volume)?;
    let temp_scale = converter.normalise_unit(&config.temp_scale, UnitCategory::Temperature)?;

    let volume_l = converter.convert(config.beverage_volume, &volume_unit, "l", UnitCategory::Volume)?;
    let temp_c = converter.convert(config.beverage_temp, &temp_scale, "c", UnitCategory::Temperature)?;

    if !volume_l.is_finite() || volume_l <= 0.0 {
        return Err(CalcError::InvalidVolume(volume_l));
    }

    let residual = residual_co2(temp_c);
    let additional = additional_co2(config.desired_vol_co2, temp_c);
    let sugar = resolve_sugar(config)?;

    let mass_g = volume_l * additional * sugar.factor;
    let density = sugar.density_g_per_l.ok_or(CalcError::MissingSugarDensity)?;
    let volume_ml = mass_g / density * 1000.0;
    let delta_sg = (mass_g / volume_l) * SG_PER_GRAM_PER_LITRE;
    let new_volume_l = volume_l + volume_ml / 1000.0;

    tracing::debug!(
        volume_l,
        temp_c,
        residual_co2 = residual,
        additional_co2 = additional,
        factor = sugar.factor,
        mass_g,
        "Computed priming dose"
    );

    Ok(PrimingBreakdown {
        volume_l,
        temp_c,
        residual_co2: residual,
        additional_co2: additional,
        sugar,
        result: PrimingResult {
            mass_g,
            volume_ml,
            delta_sg,
            new_volume_l,
        },
    })
}

/// Compute the priming dose for a beverage
pub fn compute_priming<C: ConversionService + ?Sized>(
    config: &PrimingConfig,
    converter: &C,
) -> CalcResult<PrimingResult> {
    compute_priming_breakdown(config, converter).map(|b| b.result)
}
