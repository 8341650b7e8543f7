//! Admin tools
//!
//! User management for accounts with the admin role.

use serde::Serialize;

use super::{BlockedResponse, Outcome};
use crate::api::{ApiClient, ApiError};
use crate::models::{Role, User};

/// Response for admin_list_users
#[derive(Debug, Serialize)]
pub struct ListUsersResponse {
    pub count: usize,
    pub admin_count: usize,
    pub users: Vec<User>,
}

/// Response for admin_set_role
#[derive(Debug, Serialize)]
pub struct SetRoleResponse {
    pub success: bool,
    pub user_id: i64,
    pub role: Role,
}

/// Response for admin_delete_user
#[derive(Debug, Serialize)]
pub struct DeleteUserResponse {
    pub success: bool,
    pub deleted_id: i64,
}

fn describe(context: &str, e: ApiError) -> String {
    match e {
        ApiError::Forbidden(msg) => msg,
        other => format!("{}: {}", context, other),
    }
}

pub async fn admin_list_users(api: &ApiClient) -> Result<ListUsersResponse, String> {
    let users = api
        .admin_list_users()
        .await
        .map_err(|e| describe("Failed to list users", e))?;
    Ok(ListUsersResponse {
        count: users.len(),
        admin_count: users.iter().filter(|u| u.role == Role::Admin).count(),
        users,
    })
}

pub async fn admin_set_role(api: &ApiClient, user_id: i64, role: &str) -> Result<SetRoleResponse, String> {
    let role = Role::parse(role)
        .ok_or_else(|| format!("Unknown role '{}'. Valid roles: user, admin", role.trim()))?;
    api.admin_set_role(user_id, role)
        .await
        .map_err(|e| describe("Failed to change role", e))?;
    tracing::info!("Set role of user {} to {}", user_id, role.as_str());
    Ok(SetRoleResponse {
        success: true,
        user_id,
        role,
    })
}

/// Delete a user account (requires confirm)
pub async fn admin_delete_user(api: &ApiClient, user_id: i64, confirm: bool) -> Outcome<DeleteUserResponse> {
    if !confirm {
        return Ok(Err(BlockedResponse::needs_confirm(format!(
            "Deleting user {} cannot be undone. Call again with confirm=true.",
            user_id
        ))));
    }
    api.admin_delete_user(user_id)
        .await
        .map_err(|e| describe("Failed to delete user", e))?;
    tracing::info!("Deleted user {}", user_id);
    Ok(Ok(DeleteUserResponse {
        success: true,
        deleted_id: user_id,
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
    async fn test_set_role_rejects_unknown_role() {
        let err = admin_set_role(&offline_client(), 2, "owner").await.unwrap_err();
        assert_eq!(err, "Unknown role 'owner'. Valid roles: user, admin");
    }

    #[tokio::test]
    async fn test_delete_user_needs_confirm() {
        let blocked = admin_delete_user(&offline_client(), 2, false)
            .await
            .unwrap()
            .unwrap_err();
        assert!(blocked.requires_confirm);
    }

    #[test]
    fn test_describe_passes_forbidden_through() {
        assert_eq!(
            describe("ctx", ApiError::Forbidden("Admin role required".to_string())),
            "Admin role required"
        );
        assert_eq!(
            describe("ctx", ApiError::NotAuthenticated),
            "ctx: Not logged in. Call login first."
        );
    }
}
