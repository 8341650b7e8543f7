//! Recipe Share MCP Server Implementation
//!
//! Implements the MCP server with all Recipe Share tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::api::ApiClient;
use crate::tools::recipes::{IngredientInput, RecipeChanges};
use crate::tools::status::StatusTracker;
use crate::tools::{account, admin, favorites, recipes, units, BlockedResponse};

/// Recipe Share MCP Service
#[derive(Clone)]
pub struct RecipeShareService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    api: Arc<ApiClient>,
    tool_router: ToolRouter<RecipeShareService>,
}

impl RecipeShareService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(api.base_url()))),
            api: Arc::new(api),
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn outcome_to_json<T: Serialize>(
    result: Result<Result<T, BlockedResponse>, String>,
) -> Result<CallToolResult, McpError> {
    match result.map_err(|e| McpError::internal_error(e, None))? {
        Ok(success) => to_json(&success),
        Err(blocked) => to_json(&blocked),
    }
}

// ============================================================================
// Unit Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NormalizeUnitParams {
    /// Measurement unit as typed, e.g. "Tablespoons" or "tsps"
    pub unit: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListUnitAliasesParams {
    /// Canonical unit to list (e.g. "tbsp"); omit for all units
    pub canonical: Option<String>,
}

// ============================================================================
// Account Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LoginParams {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RegisterParams {
    pub username: String,
    pub email: String,
    /// At least 8 characters with a number and an uppercase letter
    pub password: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ForgotPasswordParams {
    pub email: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ResetPasswordParams {
    /// Token from the reset email link
    pub token: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetProfileParams {
    /// User ID; omit for the logged-in user
    pub user_id: Option<i64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateProfileParams {
    pub username: Option<String>,
    pub email: Option<String>,
    /// New password; changing it logs you out
    pub password: Option<String>,
}

// ============================================================================
// Recipe Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchRecipesParams {
    /// Text to search for (optional)
    pub search: Option<String>,
    /// Sort key such as "recipe_name_asc" or "total_time_desc" (optional)
    pub sort: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RecipeIdParams {
    /// Recipe ID
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct IngredientParams {
    pub name: String,
    /// Free text, e.g. "2" or "1/2"
    #[serde(default)]
    pub amount: String,
    /// Measurement unit; normalized on save
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct RecipeFieldsParams {
    pub recipe_name: Option<String>,
    pub description: Option<String>,
    pub cuisine: Option<String>,
    /// Minutes
    pub prep_time: Option<u32>,
    /// Minutes
    pub cook_time: Option<u32>,
    pub servings: Option<u32>,
    /// Easy, Medium, or Hard
    pub difficulty: Option<String>,
    /// Replaces all ingredients
    pub ingredients: Option<Vec<IngredientParams>>,
    /// Replaces all steps, in order
    pub steps: Option<Vec<String>>,
    /// Replaces all image URLs
    pub images: Option<Vec<String>>,
    /// Replaces all tags
    pub tags: Option<Vec<String>>,
}

impl From<RecipeFieldsParams> for RecipeChanges {
    fn from(p: RecipeFieldsParams) -> Self {
        RecipeChanges {
            recipe_name: p.recipe_name,
            description: p.description,
            cuisine: p.cuisine,
            prep_time: p.prep_time,
            cook_time: p.cook_time,
            servings: p.servings,
            difficulty: p.difficulty,
            ingredients: p.ingredients.map(|list| {
                list.into_iter()
                    .map(|i| IngredientInput { name: i.name, amount: i.amount, unit: i.unit })
                    .collect()
            }),
            steps: p.steps,
            images: p.images,
            tags: p.tags,
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateRecipeParams {
    /// Recipe ID
    pub id: i64,
    #[serde(flatten)]
    pub fields: RecipeFieldsParams,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SpiceUpRecipeParams {
    /// ID of the recipe to remix
    pub id: i64,
    #[serde(flatten)]
    pub fields: RecipeFieldsParams,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteRecipeParams {
    /// Recipe ID to delete
    pub id: i64,
    /// Must be true to actually delete
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ReorderStepsParams {
    /// Recipe ID
    pub id: i64,
    /// Current zero-based step positions in their new order, e.g. [2, 0, 1]
    pub order: Vec<usize>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RateRecipeParams {
    /// Recipe ID
    pub id: i64,
    /// Stars, 1 to 5
    pub rating: i64,
}

// ============================================================================
// Admin Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetRoleParams {
    pub user_id: i64,
    /// "user" or "admin"
    pub role: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteUserParams {
    pub user_id: i64,
    /// Must be true to actually delete
    #[serde(default)]
    pub confirm: bool,
}

// ============================================================================
// Tool Router
// ============================================================================

#[tool_router]
impl RecipeShareService {
    // --- Status ---

    #[tool(description = "Get Recipe Share server status including build number, API URL, login state, uptime, and memory usage")]
    async fn recipeshare_status(&self) -> Result<CallToolResult, McpError> {
        let session = self.api.session_summary().await;
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status(session);
        to_json(&status)
    }

    #[tool(description = "Get instructions for working with recipes, units, and accounts. Call this when starting a session or when unsure how to use the recipe tools.")]
    fn recipe_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::RECIPE_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(RECIPE_INSTRUCTIONS)]))
    }

    // --- Units ---

    #[tool(description = "Normalize a measurement unit to its canonical spelling (e.g. 'Tablespoons' -> 'tbsp'). Small typos are corrected; unknown units are returned unchanged.")]
    fn normalize_unit(&self, Parameters(p): Parameters<NormalizeUnitParams>) -> Result<CallToolResult, McpError> {
        to_json(&units::normalize_unit(&p.unit))
    }

    #[tool(description = "List known spellings for each canonical measurement unit")]
    fn list_unit_aliases(&self, Parameters(p): Parameters<ListUnitAliasesParams>) -> Result<CallToolResult, McpError> {
        let result = units::list_unit_aliases(p.canonical.as_deref()).map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Accounts ---

    #[tool(description = "Log in to the recipe site. Required before most other tools.")]
    async fn login(&self, Parameters(p): Parameters<LoginParams>) -> Result<CallToolResult, McpError> {
        let result = account::login(&self.api, &p.username, &p.password)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Log out and forget the session tokens")]
    async fn logout(&self) -> Result<CallToolResult, McpError> {
        to_json(&account::logout(&self.api).await)
    }

    #[tool(description = "Create a new account (password: 8+ characters with a number and an uppercase letter)")]
    async fn register(&self, Parameters(p): Parameters<RegisterParams>) -> Result<CallToolResult, McpError> {
        outcome_to_json(account::register(&self.api, &p.username, &p.email, &p.password).await)
    }

    #[tool(description = "Request a password reset email")]
    async fn forgot_password(&self, Parameters(p): Parameters<ForgotPasswordParams>) -> Result<CallToolResult, McpError> {
        outcome_to_json(account::forgot_password(&self.api, &p.email).await)
    }

    #[tool(description = "Set a new password using the token from a reset email")]
    async fn reset_password(&self, Parameters(p): Parameters<ResetPasswordParams>) -> Result<CallToolResult, McpError> {
        outcome_to_json(account::reset_password(&self.api, &p.token, &p.new_password).await)
    }

    #[tool(description = "Get a user's profile and recipes (defaults to the logged-in user)")]
    async fn get_profile(&self, Parameters(p): Parameters<GetProfileParams>) -> Result<CallToolResult, McpError> {
        let result = account::get_profile(&self.api, p.user_id)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Update the logged-in user's username, email, or password. Changing the password logs you out.")]
    async fn update_profile(&self, Parameters(p): Parameters<UpdateProfileParams>) -> Result<CallToolResult, McpError> {
        outcome_to_json(account::update_profile(&self.api, p.username, p.email, p.password).await)
    }

    // --- Recipes ---

    #[tool(description = "Search recipes with optional text and sort key")]
    async fn search_recipes(&self, Parameters(p): Parameters<SearchRecipesParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::search_recipes(&self.api, p.search.as_deref(), p.sort.as_deref())
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get a recipe with ingredients, ordered steps, and whether you may modify it")]
    async fn get_recipe(&self, Parameters(p): Parameters<RecipeIdParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::get_recipe(&self.api, p.id)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(recipe) => serde_json::to_string_pretty(&recipe),
            None => Ok(format!(r#"{{"error": "Recipe not found", "id": {}}}"#, p.id)),
        }.map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Create a recipe. Units are normalized and every field is validated before saving.")]
    async fn create_recipe(&self, Parameters(p): Parameters<RecipeFieldsParams>) -> Result<CallToolResult, McpError> {
        outcome_to_json(recipes::create_recipe(&self.api, p.into()).await)
    }

    #[tool(description = "Update a recipe you own (admins may update any). Omitted fields keep their value; lists are replaced.")]
    async fn update_recipe(&self, Parameters(p): Parameters<UpdateRecipeParams>) -> Result<CallToolResult, McpError> {
        outcome_to_json(recipes::update_recipe(&self.api, p.id, p.fields.into()).await)
    }

    #[tool(description = "Delete a recipe you own (admins may delete any). Requires confirm=true.")]
    async fn delete_recipe(&self, Parameters(p): Parameters<DeleteRecipeParams>) -> Result<CallToolResult, McpError> {
        outcome_to_json(recipes::delete_recipe(&self.api, p.id, p.confirm).await)
    }

    #[tool(description = "Reorder a recipe's steps by listing current zero-based positions in their new order")]
    async fn reorder_recipe_steps(&self, Parameters(p): Parameters<ReorderStepsParams>) -> Result<CallToolResult, McpError> {
        outcome_to_json(recipes::reorder_recipe_steps(&self.api, p.id, &p.order).await)
    }

    #[tool(description = "Save your own remix of a recipe, named '<name> (Spiced Up)' and tagged 'remix'. Optional fields change the copy.")]
    async fn spice_up_recipe(&self, Parameters(p): Parameters<SpiceUpRecipeParams>) -> Result<CallToolResult, McpError> {
        outcome_to_json(recipes::spice_up_recipe(&self.api, p.id, p.fields.into()).await)
    }

    #[tool(description = "Rate a recipe from 1 to 5 stars")]
    async fn rate_recipe(&self, Parameters(p): Parameters<RateRecipeParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::rate_recipe(&self.api, p.id, p.rating)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Favorites ---

    #[tool(description = "List your favorite recipes")]
    async fn list_favorites(&self) -> Result<CallToolResult, McpError> {
        let result = favorites::list_favorites(&self.api)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Add a recipe to your favorites")]
    async fn add_favorite(&self, Parameters(p): Parameters<RecipeIdParams>) -> Result<CallToolResult, McpError> {
        let result = favorites::add_favorite(&self.api, p.id)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Remove a recipe from your favorites")]
    async fn remove_favorite(&self, Parameters(p): Parameters<RecipeIdParams>) -> Result<CallToolResult, McpError> {
        let result = favorites::remove_favorite(&self.api, p.id)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    // --- Admin ---

    #[tool(description = "List all user accounts (admin only)")]
    async fn admin_list_users(&self) -> Result<CallToolResult, McpError> {
        let result = admin::admin_list_users(&self.api)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Change a user's role to 'user' or 'admin' (admin only)")]
    async fn admin_set_role(&self, Parameters(p): Parameters<SetRoleParams>) -> Result<CallToolResult, McpError> {
        let result = admin::admin_set_role(&self.api, p.user_id, &p.role)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Delete a user account (admin only). Requires confirm=true.")]
    async fn admin_delete_user(&self, Parameters(p): Parameters<DeleteUserParams>) -> Result<CallToolResult, McpError> {
        outcome_to_json(admin::admin_delete_user(&self.api, p.user_id, p.confirm).await)
    }
}

#[tool_handler]
impl ServerHandler for RecipeShareService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "recipeshare".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Recipe Share".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Recipe Share - search, create, remix, and rate recipes on a recipe-sharing site. \
                 IMPORTANT: Call recipe_instructions first. Call login before other tools. \
                 Units: normalize_unit, list_unit_aliases. \
                 Account: login/logout/register/forgot_password/reset_password, get_profile/update_profile. \
                 Recipes: search_recipes, get_recipe, create/update/delete_recipe, reorder_recipe_steps, \
                 spice_up_recipe, rate_recipe. \
                 Favorites: list_favorites, add_favorite, remove_favorite. \
                 Admin: admin_list_users, admin_set_role, admin_delete_user. \
                 delete_recipe and admin_delete_user require confirm=true."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_fields_convert_to_changes() {
        let params: UpdateRecipeParams = serde_json::from_str(
            r#"{"id": 3, "servings": 4, "ingredients": [{"name": "Salt", "unit": "pinches"}]}"#,
        )
        .unwrap();
        assert_eq!(params.id, 3);

        let changes: RecipeChanges = params.fields.into();
        assert_eq!(changes.servings, Some(4));
        assert!(changes.recipe_name.is_none());
        let ingredients = changes.ingredients.unwrap();
        assert_eq!(ingredients[0].name, "Salt");
        assert_eq!(ingredients[0].amount, "");
        assert_eq!(ingredients[0].unit, "pinches");
    }

    #[test]
    fn test_delete_params_default_to_unconfirmed() {
        let params: DeleteRecipeParams = serde_json::from_str(r#"{"id": 9}"#).unwrap();
        assert!(!params.confirm);
    }

    #[test]
    fn test_outcome_to_json_maps_blocked() {
        let blocked: Result<Result<(), BlockedResponse>, String> =
            Ok(Err(BlockedResponse::new("nope")));
        assert!(outcome_to_json(blocked).is_ok());

        let failed: Result<Result<(), BlockedResponse>, String> = Err("boom".to_string());
        assert!(outcome_to_json(failed).is_err());
    }
}
