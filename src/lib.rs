//! Servings Library
//!
//! Recipe scaling engine plus the MCP server and subscriber log around it.

pub mod build_info;
pub mod config;
pub mod db;
pub mod mailing_list;
pub mod mcp;
pub mod models;
pub mod scaling;
pub mod tools;
