//! Recipe API access

pub mod client;
pub mod error;

pub use client::{ApiAck, ApiClient, RegisterRequest};
pub use error::{status_error, ApiError, ApiResult};
