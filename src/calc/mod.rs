//! Fermentation calculation module
//!
//! ABV estimation from gravity readings and priming sugar dosing.

pub mod abv;
pub mod defaults;
pub mod error;
pub mod formulas;
pub mod priming;

pub use abv::{compute_abv, compute_abv_breakdown, normalise_readings, AbvBreakdown, AbvConfig, GravityPair};
pub use defaults::{sugar_profile, SugarProfile, SUGAR_PROFILES};
pub use error::{CalcError, CalcResult};
pub use formulas::{formula_ids, lookup, AbvFormula, FORMULAS};
pub use priming::{
    additional_co2, compute_priming, compute_priming_breakdown, residual_co2, resolve_sugar,
    PrimingBreakdown, PrimingConfig, PrimingResult, ResolvedSugar,
};
