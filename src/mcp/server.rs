//! BrewCode MCP Server Implementation
//!
//! Implements the MCP server with all calculator tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::calc::defaults::{
    DEFAULT_BEVERAGE_TEMP, DEFAULT_CALIBRATION_TEMP, DEFAULT_DENSITY_SCALE, DEFAULT_FORMULA,
    DEFAULT_SUGAR_TYPE, DEFAULT_TEMP_SCALE, DEFAULT_VOLUME_UNIT, DEFAULT_VOL_CO2,
};
use crate::calc::{AbvConfig, PrimingConfig};
use crate::convert::StandardConverter;
use crate::tools::abv;
use crate::tools::priming;
use crate::tools::status::StatusTracker;
use crate::tools::units;

/// BrewCode MCP Service
#[derive(Clone)]
pub struct BrewcodeService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    converter: StandardConverter,
    tool_router: ToolRouter<BrewcodeService>,
}

impl BrewcodeService {
    pub fn new(converter: StandardConverter) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new())),
            converter,
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for BrewcodeService {
    fn default() -> Self {
        Self::new(StandardConverter::new())
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// ABV Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ComputeAbvParams {
    /// Original gravity reading, on density_scale
    pub original_reading: f64,
    /// Final gravity reading, on density_scale
    pub final_reading: f64,
    /// Density scale of both readings: sg, brix, plato, oe (default sg)
    #[serde(default = "default_density_scale")]
    pub density_scale: String,
    /// Temperature scale: c or f (default c)
    #[serde(default = "default_temp_scale")]
    pub temp_scale: String,
    /// Hydrometer calibration temperature (default 20.0)
    #[serde(default = "default_calibration_temp")]
    pub calibration_temp: f64,
    /// Formula id (default abv-basic)
    #[serde(default = "default_formula")]
    pub formula: String,
    /// Sample temperature of the original reading (defaults to calibration_temp)
    pub original_temp: Option<f64>,
    /// Sample temperature of the final reading (defaults to calibration_temp)
    pub final_temp: Option<f64>,
}

fn default_density_scale() -> String { DEFAULT_DENSITY_SCALE.to_string() }
fn default_temp_scale() -> String { DEFAULT_TEMP_SCALE.to_string() }
fn default_calibration_temp() -> f64 { DEFAULT_CALIBRATION_TEMP }
fn default_formula() -> String { DEFAULT_FORMULA.to_string() }

impl From<ComputeAbvParams> for AbvConfig {
    fn from(p: ComputeAbvParams) -> Self {
        AbvConfig {
            original_reading: p.original_reading,
            final_reading: p.final_reading,
            density_scale: p.density_scale,
            temp_scale: p.temp_scale,
            calibration_temp: p.calibration_temp,
            formula: p.formula,
            original_temp: p.original_temp,
            final_temp: p.final_temp,
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CorrectGravityParams {
    /// Raw gravity reading
    pub reading: f64,
    /// Temperature the sample was measured at
    pub sample_temp: f64,
    /// Hydrometer calibration temperature (default 20.0)
    #[serde(default = "default_calibration_temp")]
    pub calibration_temp: f64,
    /// Temperature scale: c or f (default c)
    #[serde(default = "default_temp_scale")]
    pub temp_scale: String,
    /// Density scale: sg, brix, plato, oe (default sg)
    #[serde(default = "default_density_scale")]
    pub density_scale: String,
}

// ============================================================================
// Priming Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ComputePrimingParams {
    /// Volume of beverage to prime
    pub beverage_volume: f64,
    /// Volume unit: l, ml, gal, imp_gal, qt, pt, fl_oz (default l)
    #[serde(default = "default_volume_unit")]
    pub volume_unit: String,
    /// Beverage temperature (default 20.0)
    #[serde(default = "default_beverage_temp")]
    pub beverage_temp: f64,
    /// Temperature scale: c or f (default c)
    #[serde(default = "default_temp_scale")]
    pub temp_scale: String,
    /// Carbonation target in volumes of CO2 (default 2.0)
    #[serde(default = "default_vol_co2")]
    pub desired_vol_co2: f64,
    /// Sugar type: dextrose, sucrose, honey, maltose (default dextrose)
    #[serde(default = "default_sugar_type")]
    pub sugar_type: String,
    /// Override sugar density in g/L
    pub sugar_density: Option<f64>,
    /// Override fermentable fraction (0-1)
    pub fermentable_fraction: Option<f64>,
    /// Override grams per litre per volume of CO2
    pub custom_factor: Option<f64>,
}

fn default_volume_unit() -> String { DEFAULT_VOLUME_UNIT.to_string() }
fn default_beverage_temp() -> f64 { DEFAULT_BEVERAGE_TEMP }
fn default_vol_co2() -> f64 { DEFAULT_VOL_CO2 }
fn default_sugar_type() -> String { DEFAULT_SUGAR_TYPE.to_string() }

impl From<ComputePrimingParams> for PrimingConfig {
    fn from(p: ComputePrimingParams) -> Self {
        PrimingConfig {
            beverage_volume: p.beverage_volume,
            volume_unit: p.volume_unit,
            beverage_temp: p.beverage_temp,
            temp_scale: p.temp_scale,
            desired_vol_co2: p.desired_vol_co2,
            sugar_type: p.sugar_type,
            sugar_density: p.sugar_density,
            fermentable_fraction: p.fermentable_fraction,
            custom_factor: p.custom_factor,
        }
    }
}

// ============================================================================
// Unit Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertUnitsParams {
    /// Value to convert
    pub value: f64,
    /// Unit of the value
    pub from_unit: String,
    /// Target unit
    pub to_unit: String,
    /// Category: temperature, volume, mass, density
    pub category: String,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl BrewcodeService {
    // --- Status ---

    #[tool(description = "Get the current status of the BrewCode service including build info and process information")]
    async fn brewcode_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        to_json(&tracker.get_status())
    }

    #[tool(description = "Get instructions for the ABV and priming calculators. Call this when unsure which formula, scale or sugar to use.")]
    fn brewing_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::BREWING_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(BREWING_INSTRUCTIONS)]))
    }

    // --- ABV ---

    #[tool(description = "List the available ABV formulas with their ids and labels")]
    fn list_abv_formulas(&self) -> Result<CallToolResult, McpError> {
        to_json(&abv::list_abv_formulas())
    }

    #[tool(description = "Calculate alcohol by volume from original and final gravity readings. Readings are temperature-corrected and converted to SG before the formula runs. Also reports ABW and US/UK proof.")]
    fn compute_abv(&self, Parameters(p): Parameters<ComputeAbvParams>) -> Result<CallToolResult, McpError> {
        let result = abv::compute_abv(&self.converter, p.into())
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Temperature-correct a single hydrometer reading to the calibration temperature")]
    fn correct_gravity(&self, Parameters(p): Parameters<CorrectGravityParams>) -> Result<CallToolResult, McpError> {
        let result = abv::correct_gravity(
            &self.converter,
            p.reading,
            p.sample_temp,
            p.calibration_temp,
            &p.temp_scale,
            &p.density_scale,
        )
        .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    // --- Priming ---

    #[tool(description = "List the built-in priming sugars with fermentable fraction and density")]
    fn list_sugar_types(&self) -> Result<CallToolResult, McpError> {
        to_json(&priming::list_sugar_types())
    }

    #[tool(description = "Calculate the priming sugar dose (grams and millilitres) needed to carbonate a beverage to the desired volumes of CO2, with the resulting gravity and volume increase")]
    fn compute_priming(&self, Parameters(p): Parameters<ComputePrimingParams>) -> Result<CallToolResult, McpError> {
        let result = priming::compute_priming(&self.converter, p.into())
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    // --- Units ---

    #[tool(description = "Convert a value between units of the same category (temperature, volume, mass, density)")]
    fn convert_units(&self, Parameters(p): Parameters<ConvertUnitsParams>) -> Result<CallToolResult, McpError> {
        let result = units::convert_units(&self.converter, p.value, &p.from_unit, &p.to_unit, &p.category)
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for BrewcodeService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "brewcode".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("BrewCode Fermentation Calculator".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "BrewCode - fermentation calculations for beer, mead and cider. \
                 Call brewing_instructions first if unsure about defaults. \
                 ABV: compute_abv, list_abv_formulas, correct_gravity. \
                 Priming: compute_priming, list_sugar_types. \
                 Units: convert_units. Status: brewcode_status."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abv_params_defaults() {
        let p: ComputeAbvParams =
            serde_json::from_str(r#"{"original_reading": 1.050, "final_reading": 1.010}"#).unwrap();
        let config: AbvConfig = p.into();
        assert_eq!(config, AbvConfig::new(1.050, 1.010));
    }

    #[test]
    fn test_priming_params_defaults() {
        let p: ComputePrimingParams = serde_json::from_str(r#"{"beverage_volume": 23.0}"#).unwrap();
        let config: PrimingConfig = p.into();
        assert_eq!(config, PrimingConfig::new(23.0));
    }

    #[test]
    fn test_server_info() {
        let info = BrewcodeService::default().get_info();
        assert_eq!(info.server_info.name, "brewcode");
        assert!(info.instructions.unwrap().contains("compute_priming"));
    }
}
