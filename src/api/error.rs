//! API error types

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::session::SessionError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Not logged in. Call login first.")]
    NotAuthenticated,

    #[error("{0}")]
    Forbidden(String),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(StatusCode::NOT_FOUND.as_u16())
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
}

/// Build the error for a non-success response, preferring the body's `error` text
pub fn status_error(status: StatusCode, body: &str) -> ApiError {
    let from_json = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.or(b.message).or(b.msg));

    let message = match from_json {
        Some(m) if !m.trim().is_empty() => m,
        _ if !body.trim().is_empty() && !body.trim_start().starts_with('{') => body.trim().to_string(),
        _ => status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
    };

    ApiError::Status {
        status: status.as_u16(),
        message,
    }
}
