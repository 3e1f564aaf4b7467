//! BrewCode Status Tool
//!
//! Provides runtime status information about the BrewCode service.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::calc::{FORMULAS, SUGAR_PROFILES};

/// Calculator usage instructions for AI assistants
pub const BREWING_INSTRUCTIONS: &str = r#"
# BrewCode Calculator Instructions

## Alcohol by volume (compute_abv)

Provide the original and final gravity readings. Everything else is optional:

| Field | Default | Notes |
|-------|---------|-------|
| density_scale | sg | sg, brix, plato or oe |
| temp_scale | c | c or f (k also accepted) |
| calibration_temp | 20.0 | hydrometer calibration temperature |
| formula | abv-basic | see list_abv_formulas |
| original_temp / final_temp | calibration_temp | sample temperatures |

Readings are temperature-corrected first, then converted to specific gravity,
then passed to the formula. The response also shows ABW and US/UK proof.

**Choosing a formula:**
- `abv-basic` - beer and cider at normal gravities
- `abv-berry` - wine and mead
- `abv-hall` - more accurate at high gravity (unreliable near SG 1.775)
- `abv-hmrc` - UK duty declarations (banded multipliers)

Formula ids must match exactly. An unknown id is rejected, never guessed.

**Refractometer readings:** Brix readings taken after fermentation starts are
skewed by alcohol. Only use brix for the original reading unless it was
corrected elsewhere.

---

## Priming sugar (compute_priming)

Provide the beverage volume. Optional fields:

| Field | Default | Notes |
|-------|---------|-------|
| volume_unit | l | l, ml, gal, imp_gal, qt, pt, fl_oz |
| beverage_temp | 20.0 | the warmest temperature since fermentation ended |
| temp_scale | c | c or f |
| desired_vol_co2 | 2.0 | volumes of CO2 |
| sugar_type | dextrose | dextrose, sucrose, honey, maltose |
| sugar_density | from sugar_type | g/L override |
| fermentable_fraction | from sugar_type | 0-1 override |
| custom_factor | 4.01 × fraction | g/L per volume of CO2 |

Unknown sugar types use dextrose values. If the target is already met by the
CO2 left from fermentation, every figure is zero.

**Typical carbonation targets:**
- British ales: 1.5 - 2.0
- American ales and lagers: 2.2 - 2.7
- Wheat beers and saisons: 3.0 - 4.0
- Sparkling cider and mead: 2.5 - 3.5

**Check bottle ratings before going above 3.0 volumes.**

---

## Other tools

- `correct_gravity` - temperature-correct a single reading
- `convert_units` - convert between temperature, volume, mass and density units
- `list_abv_formulas`, `list_sugar_types` - reference tables
"#;

/// Runtime status of the BrewCode service
#[derive(Debug, Clone, Serialize)]
pub struct BrewcodeStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Calculator information
    pub formulas: usize,
    pub sugar_types: usize,

    /// Process information
    pub started_at: String,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    started_at: String,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            started_at: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> BrewcodeStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        BrewcodeStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            formulas: FORMULAS.len(),
            sugar_types: SUGAR_PROFILES.len(),
            started_at: self.started_at.clone(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}
