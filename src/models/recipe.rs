//! Recipe model
//!
//! A recipe as the API returns it.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Ingredient, Step};

/// A recipe with its ingredients, steps, images, and tags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    pub recipe_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cuisine: String,
    #[serde(default)]
    pub prep_time: Option<u32>,
    #[serde(default)]
    pub cook_time: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub rating_count: Option<i64>,
    /// Set when this recipe was spiced up from another one
    #[serde(default)]
    pub parent_recipe_id: Option<i64>,
}

/// Placeholder shown when a recipe has no images
pub const NO_IMAGE: &str = "/no-image.png";

impl Recipe {
    pub fn total_time(&self) -> u32 {
        self.prep_time
            .unwrap_or(0)
            .saturating_add(self.cook_time.unwrap_or(0))
    }

    /// Banner image: the first image, or the placeholder
    pub fn cover_image(&self) -> &str {
        self.images
            .iter()
            .map(|s| s.as_str())
            .find(|s| !s.trim().is_empty())
            .unwrap_or(NO_IMAGE)
    }

    /// Steps in `step_number` order
    pub fn ordered_steps(&self) -> Vec<&Step> {
        let mut steps: Vec<&Step> = self.steps.iter().collect();
        steps.sort_by_key(|s| s.step_number);
        steps
    }
}

/// Recipe summary for listing
#[derive(Debug, Clone, Serialize)]
pub struct RecipeSummary {
    pub id: i64,
    pub recipe_name: String,
    pub cuisine: String,
    pub difficulty: String,
    pub total_time: u32,
    pub servings: Option<u32>,
    pub average_rating: Option<f64>,
    pub cover_image: String,
    pub ingredient_count: usize,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            recipe_name: recipe.recipe_name.clone(),
            cuisine: recipe.cuisine.clone(),
            difficulty: recipe.difficulty.clone(),
            total_time: recipe.total_time(),
            servings: recipe.servings,
            average_rating: recipe.average_rating,
            cover_image: recipe.cover_image().to_string(),
            ingredient_count: recipe.ingredients.len(),
        }
    }
}

/// Recipe difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Parse case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
