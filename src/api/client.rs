//! HTTP client for the recipe API
//!
//! One client is shared by every tool. It owns the session, attaches the
//! bearer token, and refreshes an expired access token before use.

use chrono::Utc;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::error::{status_error, ApiError, ApiResult};
use crate::config::Config;
use crate::models::{
    visible_users, Claims, ProfileUpdate, Rating, RatingRequest, Recipe, RecipePayload,
    RecipeQuery, Role, User,
};
use crate::session::{Session, SessionSummary, TokenPair};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Body for POST /register
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
struct ForgotPasswordRequest<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct ResetPasswordRequest<'a> {
    new_password: &'a str,
}

#[derive(Debug, Serialize)]
struct RoleRequest {
    role: Role,
}

/// Loose acknowledgement body; most write endpoints return a message, some an id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiAck {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Mutex<Session>,
}

impl ApiClient {
    pub fn new(config: &Config) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .user_agent(concat!("recipeshare/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_url.clone(),
            session: Mutex::new(Session::new()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn session_summary(&self) -> SessionSummary {
        self.session.lock().await.summary()
    }

    // ------------------------------------------------------------------
    // Plumbing
    // ------------------------------------------------------------------

    /// Send a request; non-2xx statuses become `ApiError::Status`
    async fn execute(&self, request: RequestBuilder) -> ApiResult<String> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::warn!("API request failed with {}: {}", status, body);
            return Err(status_error(status, &body));
        }
        Ok(body)
    }

    async fn execute_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let body = self.execute(request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Like `execute_json`, but an empty or non-JSON success body is fine
    async fn execute_ack(&self, request: RequestBuilder) -> ApiResult<ApiAck> {
        let body = self.execute(request).await?;
        Ok(serde_json::from_str(&body).unwrap_or_default())
    }

    fn public(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!("{} {}", method, path);
        self.http.request(method, self.url(path))
    }

    /// Request carrying a valid access token, refreshing it first if expired
    async fn authorized(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let token = {
            let mut session = self.session.lock().await;
            if !session.is_logged_in() {
                return Err(ApiError::NotAuthenticated);
            }
            if session.is_expired(Utc::now()) {
                self.refresh_locked(&mut session).await?;
            }
            session
                .access_token()
                .map(String::from)
                .ok_or(ApiError::NotAuthenticated)?
        };
        Ok(self.public(method, path).bearer_auth(token))
    }

    async fn refresh_locked(&self, session: &mut Session) -> ApiResult<()> {
        let refresh_token = match session.refresh_token() {
            Some(t) => t.to_string(),
            None => {
                session.clear();
                return Err(ApiError::NotAuthenticated);
            }
        };

        tracing::info!("Access token expired, refreshing");
        let request = self.public(Method::POST, "/refresh").bearer_auth(refresh_token);
        let result = match self.execute_json::<TokenPair>(request).await {
            Ok(tokens) => session.refresh(tokens).map(|_| ()).map_err(ApiError::from),
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            tracing::warn!("Token refresh failed: {}", e);
            session.clear();
            return Err(ApiError::NotAuthenticated);
        }
        Ok(())
    }

    /// Identity of the logged-in user
    pub async fn claims(&self) -> ApiResult<Claims> {
        let mut session = self.session.lock().await;
        if !session.is_logged_in() {
            return Err(ApiError::NotAuthenticated);
        }
        if session.is_expired(Utc::now()) {
            self.refresh_locked(&mut session).await?;
        }
        session.claims().cloned().ok_or(ApiError::NotAuthenticated)
    }

    pub async fn require_admin(&self) -> ApiResult<Claims> {
        let claims = self.claims().await?;
        if !claims.is_admin() {
            return Err(ApiError::Forbidden("Admin role required".to_string()));
        }
        Ok(claims)
    }

    // ------------------------------------------------------------------
    // Accounts
    // ------------------------------------------------------------------

    pub async fn login(&self, username: &str, password: &str) -> ApiResult<Claims> {
        let request = self
            .public(Method::POST, "/login")
            .json(&LoginRequest { username, password });
        let tokens: TokenPair = self.execute_json(request).await?;

        let mut session = self.session.lock().await;
        let claims = session.login(tokens)?.clone();
        tracing::info!("Logged in as user {}", claims.user_id());
        Ok(claims)
    }

    pub async fn logout(&self) {
        self.session.lock().await.clear();
    }

    pub async fn register(&self, data: &RegisterRequest) -> ApiResult<ApiAck> {
        let request = self.public(Method::POST, "/register").json(data);
        self.execute_ack(request).await
    }

    pub async fn forgot_password(&self, email: &str) -> ApiResult<ApiAck> {
        let request = self
            .public(Method::POST, "/forgot-password")
            .json(&ForgotPasswordRequest { email });
        self.execute_ack(request).await
    }

    pub async fn reset_password(&self, token: &str, new_password: &str) -> ApiResult<ApiAck> {
        let request = self
            .public(Method::POST, &format!("/reset-password/{}", token))
            .json(&ResetPasswordRequest { new_password });
        self.execute_ack(request).await
    }

    pub async fn get_user(&self, user_id: i64) -> ApiResult<User> {
        let request = self.authorized(Method::GET, &format!("/users/{}", user_id)).await?;
        self.execute_json(request).await
    }

    pub async fn user_recipes(&self, user_id: i64) -> ApiResult<Vec<Recipe>> {
        let request = self
            .authorized(Method::GET, &format!("/users/{}/recipes", user_id))
            .await?;
        self.execute_json(request).await
    }

    /// A password change ends the session
    pub async fn update_profile(&self, data: &ProfileUpdate) -> ApiResult<ApiAck> {
        let request = self.authorized(Method::PUT, "/update-profile").await?.json(data);
        let ack = self.execute_ack(request).await?;
        if data.changes_password() {
            tracing::info!("Password changed, clearing session");
            self.session.lock().await.clear();
        }
        Ok(ack)
    }

    // ------------------------------------------------------------------
    // Recipes
    // ------------------------------------------------------------------

    pub async fn list_recipes(&self, query: &RecipeQuery) -> ApiResult<Vec<Recipe>> {
        let request = self
            .authorized(Method::GET, "/recipes")
            .await?
            .query(&query.to_params());
        self.execute_json(request).await
    }

    pub async fn get_recipe(&self, id: i64) -> ApiResult<Recipe> {
        let request = self.authorized(Method::GET, &format!("/recipes/{}", id)).await?;
        self.execute_json(request).await
    }

    pub async fn create_recipe(&self, payload: &RecipePayload) -> ApiResult<ApiAck> {
        let request = self.authorized(Method::POST, "/recipes").await?.json(payload);
        self.execute_ack(request).await
    }

    pub async fn update_recipe(&self, id: i64, payload: &RecipePayload) -> ApiResult<ApiAck> {
        let request = self
            .authorized(Method::PUT, &format!("/recipes/{}", id))
            .await?
            .json(payload);
        self.execute_ack(request).await
    }

    pub async fn delete_recipe(&self, id: i64) -> ApiResult<ApiAck> {
        let request = self
            .authorized(Method::DELETE, &format!("/recipes/{}", id))
            .await?;
        self.execute_ack(request).await
    }

    pub async fn rate_recipe(&self, id: i64, rating: Rating) -> ApiResult<ApiAck> {
        let request = self
            .authorized(Method::POST, &format!("/recipes/{}/rate", id))
            .await?
            .json(&RatingRequest { rating });
        self.execute_ack(request).await
    }

    // ------------------------------------------------------------------
    // Favorites
    // ------------------------------------------------------------------

    pub async fn list_favorites(&self) -> ApiResult<Vec<Recipe>> {
        let request = self.authorized(Method::GET, "/users/favorites").await?;
        self.execute_json(request).await
    }

    pub async fn add_favorite(&self, recipe_id: i64) -> ApiResult<ApiAck> {
        let request = self
            .authorized(Method::POST, &format!("/users/favorites/{}", recipe_id))
            .await?
            .json(&serde_json::json!({}));
        self.execute_ack(request).await
    }

    pub async fn remove_favorite(&self, recipe_id: i64) -> ApiResult<ApiAck> {
        let request = self
            .authorized(Method::DELETE, &format!("/users/favorites/{}", recipe_id))
            .await?;
        self.execute_ack(request).await
    }

    // ------------------------------------------------------------------
    // Administration
    // ------------------------------------------------------------------

    pub async fn admin_list_users(&self) -> ApiResult<Vec<User>> {
        self.require_admin().await?;
        let request = self.authorized(Method::GET, "/admin/users").await?;
        let users: Vec<User> = self.execute_json(request).await?;
        Ok(visible_users(users))
    }

    pub async fn admin_set_role(&self, user_id: i64, role: Role) -> ApiResult<ApiAck> {
        self.require_admin().await?;
        let request = self
            .authorized(Method::PATCH, &format!("/admin/users/{}/role", user_id))
            .await?
            .json(&RoleRequest { role });
        self.execute_ack(request).await
    }

    pub async fn admin_delete_user(&self, user_id: i64) -> ApiResult<ApiAck> {
        let claims = self.require_admin().await?;
        if claims.user_id() == user_id {
            return Err(ApiError::Forbidden(
                "Admins cannot delete their own account here".to_string(),
            ));
        }
        let request = self
            .authorized(Method::DELETE, &format!("/admin/users/{}", user_id))
            .await?;
        self.execute_ack(request).await
    }
}
