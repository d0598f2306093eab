//! Servings tools module
//!
//! MCP tool implementations.

pub mod scaling;
pub mod status;
pub mod subscribers;
