//! Session state
//!
//! Holds the access and refresh tokens issued at login and the identity
//! decoded from the access token. Signatures are not verified here; the API
//! does that on every request.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Claims, Role};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Access token is not a JWT")]
    Malformed,

    #[error("Access token payload is not base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Access token payload is not valid claims JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tokens returned by POST /login and POST /refresh
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Decode the payload segment of a JWT
pub fn decode_claims(token: &str) -> Result<Claims, SessionError> {
    let mut parts = token.trim().split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_), None) if !payload.is_empty() => payload,
        _ => return Err(SessionError::Malformed),
    };
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Serializable view of the session for status output
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub logged_in: bool,
    pub user_id: Option<i64>,
    pub role: Option<Role>,
    pub expires_at: Option<DateTime<Utc>>,
    pub has_refresh_token: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    access_token: Option<String>,
    refresh_token: Option<String>,
    claims: Option<Claims>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store tokens from a successful login
    pub fn login(&mut self, tokens: TokenPair) -> Result<&Claims, SessionError> {
        let claims = decode_claims(&tokens.access_token)?;
        self.access_token = Some(tokens.access_token);
        self.refresh_token = tokens.refresh_token;
        Ok(&*self.claims.insert(claims))
    }

    /// Replace the access token after a refresh, keeping the refresh token
    pub fn refresh(&mut self, tokens: TokenPair) -> Result<&Claims, SessionError> {
        let claims = decode_claims(&tokens.access_token)?;
        self.access_token = Some(tokens.access_token);
        if tokens.refresh_token.is_some() {
            self.refresh_token = tokens.refresh_token;
        }
        Ok(&*self.claims.insert(claims))
    }

    pub fn clear(&mut self) {
        self.access_token = None;
        self.refresh_token = None;
        self.claims = None;
    }

    pub fn is_logged_in(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn claims(&self) -> Option<&Claims> {
        self.claims.as_ref()
    }

    /// True when logged in with an access token past its `exp`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.claims
            .as_ref()
            .map(|c| c.is_expired(now.timestamp()))
            .unwrap_or(false)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            logged_in: self.is_logged_in(),
            user_id: self.claims.as_ref().map(|c| c.user_id()),
            role: self.claims.as_ref().map(|c| c.role()),
            expires_at: self
                .claims
                .as_ref()
                .and_then(|c| c.exp)
                .and_then(|exp| DateTime::<Utc>::from_timestamp(exp, 0)),
            has_refresh_token: self.refresh_token.is_some(),
        }
    }
}
