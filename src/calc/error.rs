//! Calculation error types

use thiserror::Error;

use crate::convert::ConversionError;

/// Fermentation calculation error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Invalid ABV formula '{id}' (valid formulas: {})", .valid.join(", "))]
    InvalidFormula { id: String, valid: Vec<&'static str> },

    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),

    #[error("Sugar density could not be resolved to a positive value")]
    MissingSugarDensity,

    #[error("Invalid {field} override: {value}")]
    InvalidSugarOverride { field: &'static str, value: f64 },

    #[error("Beverage volume must be a positive number of litres, got {0}")]
    InvalidVolume(f64),
}

/// Result type for fermentation calculations
pub type CalcResult<T> = Result<T, CalcError>;
