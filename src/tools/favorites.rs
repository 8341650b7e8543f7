//! Favorite tools

use serde::Serialize;

use crate::api::ApiClient;
use crate::models::RecipeSummary;

/// Response for list_favorites
#[derive(Debug, Serialize)]
pub struct ListFavoritesResponse {
    pub count: usize,
    pub recipes: Vec<RecipeSummary>,
}

/// Response for add_favorite / remove_favorite
#[derive(Debug, Serialize)]
pub struct FavoriteResponse {
    pub success: bool,
    pub recipe_id: i64,
    pub favorited: bool,
    pub message: Option<String>,
}

pub async fn list_favorites(api: &ApiClient) -> Result<ListFavoritesResponse, String> {
    let recipes = api
        .list_favorites()
        .await
        .map_err(|e| format!("Failed to list favorites: {}", e))?;
    let recipes: Vec<RecipeSummary> = recipes.iter().map(RecipeSummary::from).collect();
    Ok(ListFavoritesResponse {
        count: recipes.len(),
        recipes,
    })
}

pub async fn add_favorite(api: &ApiClient, recipe_id: i64) -> Result<FavoriteResponse, String> {
    let ack = api
        .add_favorite(recipe_id)
        .await
        .map_err(|e| format!("Failed to add favorite: {}", e))?;
    Ok(FavoriteResponse {
        success: true,
        recipe_id,
        favorited: true,
        message: ack.message,
    })
}

pub async fn remove_favorite(api: &ApiClient, recipe_id: i64) -> Result<FavoriteResponse, String> {
    let ack = api
        .remove_favorite(recipe_id)
        .await
        .map_err(|e| format!("Failed to remove favorite: {}", e))?;
    Ok(FavoriteResponse {
        success: true,
        recipe_id,
        favorited: false,
        message: ack.message,
    })
}
