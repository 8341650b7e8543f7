//! Recipe Share tools module
//!
//! Tool implementations behind the MCP server. Each function returns
//! `Result<T, String>`; a request the caller must fix or confirm comes back
//! as `Ok(Err(BlockedResponse))` so it reaches the client as JSON.

use serde::Serialize;

use crate::models::FieldError;

pub mod account;
pub mod admin;
pub mod favorites;
pub mod recipes;
pub mod status;
pub mod units;

/// Response for a request that was refused before reaching the API
#[derive(Debug, Serialize)]
pub struct BlockedResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub field_errors: Vec<FieldError>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub requires_confirm: bool,
}

impl BlockedResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            field_errors: Vec::new(),
            requires_confirm: false,
        }
    }

    pub fn validation(field_errors: Vec<FieldError>) -> Self {
        Self {
            error: format!("Validation failed for {} field(s)", field_errors.len()),
            field_errors,
            requires_confirm: false,
        }
    }

    pub fn needs_confirm(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            field_errors: Vec::new(),
            requires_confirm: true,
        }
    }
}

/// Outcome of a tool that may be blocked
pub type Outcome<T> = Result<Result<T, BlockedResponse>, String>;
