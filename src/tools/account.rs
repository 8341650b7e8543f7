//! Account tools
//!
//! Login, registration, password recovery and the user profile.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{BlockedResponse, Outcome};
use crate::api::{ApiClient, RegisterRequest};
use crate::models::{validate_password, ProfileUpdate, RecipeSummary, Role, User};

/// Response for login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user_id: i64,
    pub role: Role,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Generic acknowledgement for account actions
#[derive(Debug, Serialize)]
pub struct AccountActionResponse {
    pub success: bool,
    pub message: String,
}

/// Response for get_profile
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: User,
    pub is_self: bool,
    pub recipe_count: usize,
    pub recipes: Vec<RecipeSummary>,
}

/// Response for update_profile
#[derive(Debug, Serialize)]
pub struct UpdateProfileResponse {
    pub success: bool,
    pub message: String,
    /// A password change logs the user out
    pub session_cleared: bool,
}

fn require(field: &str, value: &str) -> Result<(), BlockedResponse> {
    if value.trim().is_empty() {
        return Err(BlockedResponse::new(format!("{} is required", field)));
    }
    Ok(())
}

pub async fn login(api: &ApiClient, username: &str, password: &str) -> Result<LoginResponse, String> {
    if username.trim().is_empty() || password.is_empty() {
        return Err("Username and password are required".to_string());
    }
    let claims = api
        .login(username.trim(), password)
        .await
        .map_err(|e| format!("Login failed: {}", e))?;
    Ok(LoginResponse {
        success: true,
        user_id: claims.user_id(),
        role: claims.role(),
        expires_at: claims.exp.and_then(|exp| DateTime::<Utc>::from_timestamp(exp, 0)),
    })
}

pub async fn logout(api: &ApiClient) -> AccountActionResponse {
    api.logout().await;
    AccountActionResponse {
        success: true,
        message: "Logged out".to_string(),
    }
}

pub async fn register(
    api: &ApiClient,
    username: &str,
    email: &str,
    password: &str,
) -> Outcome<AccountActionResponse> {
    let checks = require("Username", username)
        .and_then(|_| require("Email", email))
        .and_then(|_| validate_password(password).map_err(|e| BlockedResponse::new(e.to_string())));
    if let Err(blocked) = checks {
        return Ok(Err(blocked));
    }

    let request = RegisterRequest {
        username: username.trim().to_string(),
        email: email.trim().to_string(),
        password: password.to_string(),
    };
    let ack = api
        .register(&request)
        .await
        .map_err(|e| format!("Registration failed: {}", e))?;
    tracing::info!("Registered user '{}'", request.username);

    Ok(Ok(AccountActionResponse {
        success: true,
        message: ack
            .message
            .unwrap_or_else(|| "Registration successful. You can now log in.".to_string()),
    }))
}

pub async fn forgot_password(api: &ApiClient, email: &str) -> Outcome<AccountActionResponse> {
    if let Err(blocked) = require("Email", email) {
        return Ok(Err(blocked));
    }
    let ack = api
        .forgot_password(email.trim())
        .await
        .map_err(|e| format!("Failed to request password reset: {}", e))?;
    Ok(Ok(AccountActionResponse {
        success: true,
        message: ack
            .message
            .unwrap_or_else(|| "If that email is registered, a reset link has been sent.".to_string()),
    }))
}

pub async fn reset_password(
    api: &ApiClient,
    token: &str,
    new_password: &str,
) -> Outcome<AccountActionResponse> {
    let checks = require("Reset token", token)
        .and_then(|_| validate_password(new_password).map_err(|e| BlockedResponse::new(e.to_string())));
    if let Err(blocked) = checks {
        return Ok(Err(blocked));
    }
    let ack = api
        .reset_password(token.trim(), new_password)
        .await
        .map_err(|e| format!("Failed to reset password: {}", e))?;
    Ok(Ok(AccountActionResponse {
        success: true,
        message: ack
            .message
            .unwrap_or_else(|| "Password has been reset.".to_string()),
    }))
}

/// Profile and recipes of a user; the logged-in user when `user_id` is None
pub async fn get_profile(api: &ApiClient, user_id: Option<i64>) -> Result<ProfileResponse, String> {
    let claims = api.claims().await.map_err(|e| e.to_string())?;
    let id = user_id.unwrap_or_else(|| claims.user_id());

    let user = api
        .get_user(id)
        .await
        .map_err(|e| format!("Failed to get user {}: {}", id, e))?;
    let recipes = api
        .user_recipes(id)
        .await
        .map_err(|e| format!("Failed to get recipes for user {}: {}", id, e))?;
    let recipes: Vec<RecipeSummary> = recipes.iter().map(RecipeSummary::from).collect();

    Ok(ProfileResponse {
        user,
        is_self: id == claims.user_id(),
        recipe_count: recipes.len(),
        recipes,
    })
}

/// Update the logged-in user's profile. Omitted fields keep their current value.
pub async fn update_profile(
    api: &ApiClient,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> Outcome<UpdateProfileResponse> {
    let claims = api.claims().await.map_err(|e| e.to_string())?;
    let current = api
        .get_user(claims.user_id())
        .await
        .map_err(|e| format!("Failed to load profile: {}", e))?;

    let update = ProfileUpdate {
        username: username.unwrap_or(current.username).trim().to_string(),
        email: email.unwrap_or(current.email).trim().to_string(),
        password: password.unwrap_or_default(),
    };
    let mut checks = require("Username", &update.username).and_then(|_| require("Email", &update.email));
    if checks.is_ok() && update.changes_password() {
        checks = validate_password(&update.password).map_err(|e| BlockedResponse::new(e.to_string()));
    }
    if let Err(blocked) = checks {
        return Ok(Err(blocked));
    }

    let ack = api
        .update_profile(&update)
        .await
        .map_err(|e| format!("Failed to update profile: {}", e))?;
    let session_cleared = update.changes_password();
    let message = match (session_cleared, ack.message) {
        (true, _) => "Password updated. Please log in again.".to_string(),
        (false, Some(m)) => m,
        (false, None) => "Profile updated".to_string(),
    };

    Ok(Ok(UpdateProfileResponse {
        success: true,
        message,
        session_cleared,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::time::Duration;

    fn offline_client() -> ApiClient {
        ApiClient::new(&Config {
            api_url: "http://127.0.0.1:9".to_string(),
            http_timeout: Duration::from_secs(1),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_register_blocks_weak_password() {
        let api = offline_client();
        let blocked = register(&api, "cook", "cook@example.com", "short")
            .await
            .unwrap()
            .unwrap_err();
        assert_eq!(blocked.error, "Password must be at least 8 characters long.");

        let blocked = register(&api, "cook", "cook@example.com", "longenough1")
            .await
            .unwrap()
            .unwrap_err();
        assert!(blocked.error.contains("uppercase"));
    }

    #[tokio::test]
    async fn test_register_requires_fields() {
        let blocked = register(&offline_client(), " ", "cook@example.com", "Password1")
            .await
            .unwrap()
            .unwrap_err();
        assert_eq!(blocked.error, "Username is required");
    }

    #[tokio::test]
    async fn test_reset_password_applies_policy() {
        let blocked = reset_password(&offline_client(), "tok", "Password")
            .await
            .unwrap()
            .unwrap_err();
        assert!(blocked.error.contains("number"));
    }

    #[tokio::test]
    async fn test_login_requires_credentials() {
        let err = login(&offline_client(), "", "x").await.unwrap_err();
        assert_eq!(err, "Username and password are required");
    }

    #[tokio::test]
    async fn test_profile_requires_login() {
        let err = get_profile(&offline_client(), None).await.unwrap_err();
        assert!(err.contains("Not logged in"));
    }

    #[tokio::test]
    async fn test_logout_always_succeeds() {
        let resp = logout(&offline_client()).await;
        assert!(resp.success);
    }
}
