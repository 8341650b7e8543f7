//! Recipe Share Library
//!
//! Unit normalization, recipe drafts, and an MCP bridge to the recipe API.

pub mod api;
pub mod build_info;
pub mod config;
pub mod mcp;
pub mod models;
pub mod session;
pub mod tools;
pub mod units;
