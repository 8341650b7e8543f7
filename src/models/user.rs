//! User, role, and token claim models
//!
//! Also holds the client-side permission checks and the password policy.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use super::Recipe;

/// Username the API keeps for content whose author was deleted
pub const DELETED_USERNAME: &str = "[deleted]";

/// Minimum password length
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

/// A registered account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_role")]
    pub role: Role,
}

fn default_role() -> Role {
    Role::User
}

/// Data for PUT /update-profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub username: String,
    pub email: String,
    /// Blank keeps the current password
    #[serde(default)]
    pub password: String,
}

impl ProfileUpdate {
    pub fn changes_password(&self) -> bool {
        !self.password.is_empty()
    }
}

/// Identity carried in the access token payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User id; some tokens carry it as a string, some as a number
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub sub: i64,
    #[serde(default)]
    pub role: Option<String>,
    /// Expiry as seconds since the epoch
    #[serde(default)]
    pub exp: Option<i64>,
}

impl Claims {
    pub fn user_id(&self) -> i64 {
        self.sub
    }

    pub fn role(&self) -> Role {
        self.role
            .as_deref()
            .and_then(Role::parse)
            .unwrap_or(Role::User)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Role::Admin
    }

    pub fn is_expired(&self, now_epoch_secs: i64) -> bool {
        matches!(self.exp, Some(exp) if exp < now_epoch_secs)
    }
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Num(i64),
        Text(String),
    }

    match Id::deserialize(deserializer)? {
        Id::Num(n) => Ok(n),
        Id::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Owners and admins may edit or delete a recipe
pub fn can_modify_recipe(claims: &Claims, recipe: &Recipe) -> bool {
    claims.is_admin() || recipe.user_id == Some(claims.user_id())
}

/// Drop the placeholder account from admin listings
pub fn visible_users(users: Vec<User>) -> Vec<User> {
    users
        .into_iter()
        .filter(|u| u.username != DELETED_USERNAME)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Password must be at least 8 characters long.")]
    TooShort,
    #[error("Password must contain at least one number.")]
    MissingDigit,
    #[error("Password must contain at least one uppercase letter.")]
    MissingUppercase,
}

/// Check a new password against the account policy
pub fn validate_password(password: &str) -> Result<(), PasswordError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(PasswordError::TooShort);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordError::MissingDigit);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PasswordError::MissingUppercase);
    }
    Ok(())
}
