//! Recipe tools
//!
//! Search, view, create, edit, remix, rate and delete recipes. Every write
//! goes through a `RecipeDraft` so it is normalized and validated the same
//! way the web form does it.

use serde::Serialize;

use super::{BlockedResponse, Outcome};
use crate::api::{ApiClient, ApiError};
use crate::models::{
    can_modify_recipe, Claims, DraftError, IngredientField, Rating, Recipe, RecipeDraft,
    RecipeQuery, RecipeSummary, SortKey, Step,
};

/// One ingredient row as supplied by a tool call
#[derive(Debug, Clone, Default)]
pub struct IngredientInput {
    pub name: String,
    pub amount: String,
    pub unit: String,
}

/// Field edits for create/update/spice-up. `None` leaves a field as it is.
#[derive(Debug, Clone, Default)]
pub struct RecipeChanges {
    pub recipe_name: Option<String>,
    pub description: Option<String>,
    pub cuisine: Option<String>,
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub servings: Option<u32>,
    pub difficulty: Option<String>,
    /// Replaces the ingredient list
    pub ingredients: Option<Vec<IngredientInput>>,
    /// Replaces the steps, in order
    pub steps: Option<Vec<String>>,
    /// Replaces the image URLs
    pub images: Option<Vec<String>>,
    /// Replaces the tags
    pub tags: Option<Vec<String>>,
}

impl RecipeChanges {
    /// Apply the edits through the draft's form operations, then normalize
    /// every ingredient unit the way submission does.
    ///
    /// Returns how many ingredient units were rewritten by the normalizer,
    /// including rows carried over from a stored recipe.
    pub fn apply(self, draft: &mut RecipeDraft) -> Result<usize, DraftError> {
        if let Some(v) = self.recipe_name {
            draft.recipe_name = v;
        }
        if let Some(v) = self.description {
            draft.description = v;
        }
        if let Some(v) = self.cuisine {
            draft.cuisine = v;
        }
        if let Some(v) = self.prep_time {
            draft.prep_time = v.to_string();
        }
        if let Some(v) = self.cook_time {
            draft.cook_time = v.to_string();
        }
        if let Some(v) = self.servings {
            draft.servings = v.to_string();
        }
        if let Some(v) = self.difficulty {
            draft.difficulty = v;
        }

        let mut units_normalized = 0;
        if let Some(ingredients) = self.ingredients {
            while let Some(last) = draft.ingredients.len().checked_sub(1) {
                draft.remove_ingredient(last)?;
            }
            for input in ingredients {
                let i = draft.add_ingredient();
                draft.set_ingredient_field(i, IngredientField::Name, &input.name)?;
                draft.set_ingredient_field(i, IngredientField::Amount, &input.amount)?;
                draft.set_ingredient_field(i, IngredientField::Unit, &input.unit)?;
                if draft.commit_ingredient_unit(i)? {
                    units_normalized += 1;
                }
            }
        }

        if let Some(steps) = self.steps {
            while let Some(last) = draft.steps.len().checked_sub(1) {
                draft.remove_step(last)?;
            }
            for text in steps {
                let i = draft.add_step();
                draft.set_step(i, &text)?;
            }
        }

        if let Some(images) = self.images {
            while let Some(last) = draft.images.len().checked_sub(1) {
                draft.remove_image(last)?;
            }
            for url in images {
                let i = draft.add_image();
                draft.set_image(i, &url)?;
            }
        }

        if let Some(tags) = self.tags {
            for existing in draft.tags.clone() {
                draft.remove_tag(&existing);
            }
            for tag in tags {
                draft.add_tag(&tag);
            }
        }

        units_normalized += draft.normalize_units();
        Ok(units_normalized)
    }
}

/// Response for search_recipes
#[derive(Debug, Serialize)]
pub struct SearchRecipesResponse {
    pub search: String,
    pub sort: &'static str,
    pub count: usize,
    pub recipes: Vec<RecipeSummary>,
}

/// Full recipe with derived display fields
#[derive(Debug, Serialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub total_time: u32,
    pub cover_image: String,
    /// Ingredients as readable lines, e.g. "2 cup of flour"
    pub ingredient_lines: Vec<String>,
    /// Whether the logged-in user may edit or delete it
    pub can_modify: bool,
}

impl RecipeDetail {
    pub fn new(mut recipe: Recipe, claims: &Claims) -> Self {
        recipe.steps = recipe.ordered_steps().into_iter().cloned().collect();
        Self {
            total_time: recipe.total_time(),
            cover_image: recipe.cover_image().to_string(),
            ingredient_lines: recipe.ingredients.iter().map(|i| i.display_line()).collect(),
            can_modify: can_modify_recipe(claims, &recipe),
            recipe,
        }
    }
}

/// Response for create_recipe and spice_up_recipe
#[derive(Debug, Serialize)]
pub struct CreateRecipeResponse {
    pub success: bool,
    pub id: Option<i64>,
    pub recipe_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_recipe_id: Option<i64>,
    pub units_normalized: usize,
    pub message: Option<String>,
}

/// Response for update_recipe
#[derive(Debug, Serialize)]
pub struct UpdateRecipeResponse {
    pub success: bool,
    pub id: i64,
    pub recipe_name: String,
    pub units_normalized: usize,
    pub message: Option<String>,
}

/// Response for reorder_recipe_steps
#[derive(Debug, Serialize)]
pub struct ReorderStepsResponse {
    pub success: bool,
    pub id: i64,
    pub steps: Vec<Step>,
}

/// Response for delete_recipe
#[derive(Debug, Serialize)]
pub struct DeleteRecipeResponse {
    pub success: bool,
    pub deleted_id: i64,
}

/// Response for rate_recipe
#[derive(Debug, Serialize)]
pub struct RateRecipeResponse {
    pub success: bool,
    pub recipe_id: i64,
    pub rating: Rating,
    pub message: Option<String>,
}

async fn fetch_recipe(api: &ApiClient, id: i64) -> Result<Recipe, String> {
    match api.get_recipe(id).await {
        Ok(recipe) => Ok(recipe),
        Err(e) if e.is_not_found() => Err(format!("Recipe not found with id: {}", id)),
        Err(e) => Err(format!("Failed to get recipe: {}", e)),
    }
}

/// Fetch a recipe the current user is allowed to change
async fn fetch_editable(api: &ApiClient, id: i64) -> Outcome<(Recipe, Claims)> {
    let recipe = fetch_recipe(api, id).await?;
    let claims = api.claims().await.map_err(|e| e.to_string())?;
    if !can_modify_recipe(&claims, &recipe) {
        return Ok(Err(BlockedResponse::new(format!(
            "You do not have permission to modify recipe {}",
            id
        ))));
    }
    Ok(Ok((recipe, claims)))
}

// ============================================================================
// Recipe Tools
// ============================================================================

/// Search and sort the recipe list
pub async fn search_recipes(
    api: &ApiClient,
    search: Option<&str>,
    sort: Option<&str>,
) -> Result<SearchRecipesResponse, String> {
    let sort = match sort.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => SortKey::parse(s).ok_or_else(|| {
            let valid: Vec<&str> = SortKey::ALL
                .iter()
                .map(|k| k.as_param())
                .filter(|p| !p.is_empty())
                .collect();
            format!("Unknown sort key '{}'. Valid keys: {}", s, valid.join(", "))
        })?,
        None => SortKey::default(),
    };
    let query = RecipeQuery::new(search, sort);

    let recipes = api
        .list_recipes(&query)
        .await
        .map_err(|e| format!("Failed to list recipes: {}", e))?;

    let summaries: Vec<RecipeSummary> = recipes.iter().map(RecipeSummary::from).collect();
    Ok(SearchRecipesResponse {
        search: query.search,
        sort: sort.label(),
        count: summaries.len(),
        recipes: summaries,
    })
}

/// Get a recipe with full details
pub async fn get_recipe(api: &ApiClient, id: i64) -> Result<Option<RecipeDetail>, String> {
    let recipe = match api.get_recipe(id).await {
        Ok(recipe) => recipe,
        Err(e) if e.is_not_found() => return Ok(None),
        Err(e) => return Err(format!("Failed to get recipe: {}", e)),
    };
    let claims = api.claims().await.map_err(|e| e.to_string())?;
    Ok(Some(RecipeDetail::new(recipe, &claims)))
}

/// Create a new recipe
pub async fn create_recipe(api: &ApiClient, changes: RecipeChanges) -> Outcome<CreateRecipeResponse> {
    let claims = api.claims().await.map_err(|e| e.to_string())?;

    let mut draft = RecipeDraft::new();
    let units_normalized = changes.apply(&mut draft).map_err(|e| e.to_string())?;
    let payload = match draft.into_payload(Some(claims.user_id())) {
        Ok(p) => p,
        Err(errors) => return Ok(Err(BlockedResponse::validation(errors))),
    };

    let ack = api
        .create_recipe(&payload)
        .await
        .map_err(|e| format!("Failed to create recipe: {}", e))?;
    tracing::info!("Created recipe '{}'", payload.recipe_name);

    Ok(Ok(CreateRecipeResponse {
        success: true,
        id: ack.id,
        recipe_name: payload.recipe_name,
        parent_recipe_id: None,
        units_normalized,
        message: ack.message,
    }))
}

/// Update a recipe (owner or admin only)
pub async fn update_recipe(
    api: &ApiClient,
    id: i64,
    changes: RecipeChanges,
) -> Outcome<UpdateRecipeResponse> {
    let (recipe, _) = match fetch_editable(api, id).await? {
        Ok(found) => found,
        Err(blocked) => return Ok(Err(blocked)),
    };

    let mut draft = RecipeDraft::from_recipe(&recipe);
    let units_normalized = changes.apply(&mut draft).map_err(|e| e.to_string())?;
    let payload = match draft.into_payload(recipe.user_id) {
        Ok(p) => p,
        Err(errors) => return Ok(Err(BlockedResponse::validation(errors))),
    };

    let ack = api
        .update_recipe(id, &payload)
        .await
        .map_err(|e| format!("Failed to update recipe: {}", e))?;

    Ok(Ok(UpdateRecipeResponse {
        success: true,
        id,
        recipe_name: payload.recipe_name,
        units_normalized,
        message: ack.message,
    }))
}

/// Put a recipe's steps in a new order.
///
/// `order` lists the current zero-based step positions in their new order.
pub async fn reorder_recipe_steps(
    api: &ApiClient,
    id: i64,
    order: &[usize],
) -> Outcome<ReorderStepsResponse> {
    let (recipe, _) = match fetch_editable(api, id).await? {
        Ok(found) => found,
        Err(blocked) => return Ok(Err(blocked)),
    };

    let mut draft = RecipeDraft::from_recipe(&recipe);
    draft.reorder_steps(order).map_err(|e| e.to_string())?;
    let payload = match draft.into_payload(recipe.user_id) {
        Ok(p) => p,
        Err(errors) => return Ok(Err(BlockedResponse::validation(errors))),
    };

    api.update_recipe(id, &payload)
        .await
        .map_err(|e| format!("Failed to update recipe: {}", e))?;

    Ok(Ok(ReorderStepsResponse {
        success: true,
        id,
        steps: payload.steps,
    }))
}

/// Delete a recipe (owner or admin only, requires confirm)
pub async fn delete_recipe(api: &ApiClient, id: i64, confirm: bool) -> Outcome<DeleteRecipeResponse> {
    let (recipe, _) = match fetch_editable(api, id).await? {
        Ok(found) => found,
        Err(blocked) => return Ok(Err(blocked)),
    };

    if !confirm {
        return Ok(Err(BlockedResponse::needs_confirm(format!(
            "Deleting '{}' cannot be undone. Call again with confirm=true.",
            recipe.recipe_name
        ))));
    }

    api.delete_recipe(id)
        .await
        .map_err(|e| format!("Failed to delete recipe: {}", e))?;
    tracing::info!("Deleted recipe {}", id);

    Ok(Ok(DeleteRecipeResponse {
        success: true,
        deleted_id: id,
    }))
}

/// Save a remix of an existing recipe under the current user
pub async fn spice_up_recipe(
    api: &ApiClient,
    id: i64,
    changes: RecipeChanges,
) -> Outcome<CreateRecipeResponse> {
    let source = fetch_recipe(api, id).await?;
    let claims = api.claims().await.map_err(|e| e.to_string())?;

    let mut draft = RecipeDraft::spice_up(&source);
    let units_normalized = changes.apply(&mut draft).map_err(|e| e.to_string())?;
    let payload = match draft.into_payload(Some(claims.user_id())) {
        Ok(p) => p,
        Err(errors) => return Ok(Err(BlockedResponse::validation(errors))),
    };

    let ack = api
        .create_recipe(&payload)
        .await
        .map_err(|e| format!("Failed to save remix: {}", e))?;
    tracing::info!("Spiced up recipe {} as '{}'", id, payload.recipe_name);

    Ok(Ok(CreateRecipeResponse {
        success: true,
        id: ack.id,
        recipe_name: payload.recipe_name,
        parent_recipe_id: payload.parent_recipe_id,
        units_normalized,
        message: ack.message,
    }))
}

/// Rate a recipe from 1 to 5 stars
pub async fn rate_recipe(api: &ApiClient, id: i64, stars: i64) -> Result<RateRecipeResponse, String> {
    let rating = Rating::new(stars).map_err(|e| e.to_string())?;
    let ack = match api.rate_recipe(id, rating).await {
        Ok(ack) => ack,
        Err(ApiError::Status { status: 404, .. }) => {
            return Err(format!("Recipe not found with id: {}", id))
        }
        Err(e) => return Err(format!("Failed to rate recipe: {}", e)),
    };

    Ok(RateRecipeResponse {
        success: true,
        recipe_id: id,
        rating,
        message: ack.message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::time::Duration;

    fn sample_recipe() -> Recipe {
        serde_json::from_str(
            r#"{
                "id": 7,
                "user_id": 3,
                "recipe_name": "Chili",
                "description": "Hearty",
                "cuisine": "Tex-Mex",
                "prep_time": 15,
                "cook_time": 60,
                "servings": 6,
                "difficulty": "Medium",
                "ingredients": [
                    {"ingredient_name": "Beans", "amount": "2", "measurement_unit": "can"}
                ],
                "steps": [
                    {"step_number": 2, "instruction": "Simmer"},
                    {"step_number": 1, "instruction": "Brown the beef"}
                ],
                "images": [],
                "tags": ["spicy"]
            }"#,
        )
        .unwrap()
    }

    fn claims(sub: i64, role: &str) -> Claims {
        Claims {
            sub,
            role: Some(role.to_string()),
            exp: None,
        }
    }

    fn offline_client() -> ApiClient {
        ApiClient::new(&Config {
            api_url: "http://127.0.0.1:9".to_string(),
            http_timeout: Duration::from_secs(1),
        })
        .unwrap()
    }

    #[test]
    fn test_apply_normalizes_units() {
        let mut draft = RecipeDraft::new();
        let changes = RecipeChanges {
            recipe_name: Some("Pancakes".to_string()),
            ingredients: Some(vec![
                IngredientInput {
                    name: "Flour".to_string(),
                    amount: "2".to_string(),
                    unit: "Cups".to_string(),
                },
                IngredientInput {
                    name: "Sugar".to_string(),
                    amount: "1".to_string(),
                    unit: "tablespon".to_string(),
                },
                IngredientInput {
                    name: "Salt".to_string(),
                    amount: "1".to_string(),
                    unit: "pinch".to_string(),
                },
            ]),
            ..Default::default()
        };

        let changed = changes.apply(&mut draft).unwrap();
        assert_eq!(changed, 2);
        assert_eq!(draft.recipe_name, "Pancakes");
        let units: Vec<&str> = draft
            .ingredients
            .iter()
            .map(|i| i.measurement_unit.as_str())
            .collect();
        assert_eq!(units, vec!["cup", "tbsp", "pinch"]);
    }

    #[test]
    fn test_apply_replaces_lists() {
        let mut draft = RecipeDraft::from_recipe(&sample_recipe());
        let changes = RecipeChanges {
            steps: Some(vec!["One".to_string(), "Two".to_string(), "Three".to_string()]),
            tags: Some(vec!["Weeknight".to_string()]),
            images: Some(vec!["https://example.com/chili.jpg".to_string()]),
            ..Default::default()
        };
        changes.apply(&mut draft).unwrap();

        let numbers: Vec<u32> = draft.steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(draft.steps[2].instruction, "Three");
        assert_eq!(draft.tags, vec!["weeknight"]);
        assert_eq!(draft.images, vec!["https://example.com/chili.jpg"]);
        assert_eq!(draft.ingredients.len(), 1);
    }

    #[test]
    fn test_apply_counts_units_on_kept_ingredients() {
        let mut recipe = sample_recipe();
        recipe.ingredients[0].measurement_unit = "Cans".to_string();
        let mut draft = RecipeDraft::from_recipe(&recipe);

        let changed = RecipeChanges {
            recipe_name: Some("Chili Deluxe".to_string()),
            ..Default::default()
        }
        .apply(&mut draft)
        .unwrap();
        assert_eq!(changed, 1);
        assert_eq!(draft.ingredients[0].measurement_unit, "can");
    }

    #[test]
    fn test_apply_blank_ingredient_fails_validation() {
        let mut draft = RecipeDraft::from_recipe(&sample_recipe());
        RecipeChanges {
            ingredients: Some(vec![IngredientInput::default()]),
            ..Default::default()
        }
        .apply(&mut draft)
        .unwrap();

        let errors = draft.into_payload(Some(3)).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "ingredient_0"));
    }

    #[test]
    fn test_recipe_detail_orders_steps_and_permissions() {
        let detail = RecipeDetail::new(sample_recipe(), &claims(3, "user"));
        assert!(detail.can_modify);
        assert_eq!(detail.total_time, 75);
        assert_eq!(detail.recipe.steps[0].instruction, "Brown the beef");

        let other = RecipeDetail::new(sample_recipe(), &claims(4, "user"));
        assert!(!other.can_modify);
        let admin = RecipeDetail::new(sample_recipe(), &claims(4, "admin"));
        assert!(admin.can_modify);
    }

    #[test]
    fn test_recipe_detail_flattens_recipe() {
        let json = serde_json::to_value(RecipeDetail::new(sample_recipe(), &claims(3, "user"))).unwrap();
        assert_eq!(json["recipe_name"], "Chili");
        assert_eq!(json["cover_image"], "/no-image.png");
        assert_eq!(json["can_modify"], true);
        assert_eq!(json["ingredient_lines"][0], "2 can of Beans");
    }

    #[tokio::test]
    async fn test_rate_recipe_rejects_out_of_range() {
        let err = rate_recipe(&offline_client(), 1, 6).await.unwrap_err();
        assert!(err.contains("between 1 and 5"));
    }

    #[tokio::test]
    async fn test_search_rejects_unknown_sort() {
        let err = search_recipes(&offline_client(), None, Some("spiciest"))
            .await
            .unwrap_err();
        assert!(err.contains("Unknown sort key 'spiciest'"));
    }

    #[tokio::test]
    async fn test_tools_require_login() {
        let api = offline_client();
        let err = create_recipe(&api, RecipeChanges::default()).await.unwrap_err();
        assert!(err.contains("Not logged in"));
        let err = search_recipes(&api, Some("soup"), None).await.unwrap_err();
        assert!(err.contains("Not logged in"));
    }
}
