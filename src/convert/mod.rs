//! Unit conversion module
//!
//! Normalises volumes, temperatures and density readings before the
//! fermentation calculators use them.

pub mod converter;
pub mod units;

pub use converter::{
    from_sg, to_sg, ConversionError, ConversionResult, ConversionService, StandardConverter,
};
pub use units::{canonical_unit, grams_per_unit, litres_per_unit, DensityScale, TempScale, UnitCategory};
