//! MCP server module
//!
//! Exposes the calculators as MCP tools over stdio.

pub mod server;

pub use server::BrewcodeService;
