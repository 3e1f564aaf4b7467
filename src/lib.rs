//! BrewCode Library
//!
//! Fermentation calculations for homebrew, mead and cider.

pub mod build_info;
pub mod calc;
pub mod convert;
pub mod mcp;
pub mod tools;
