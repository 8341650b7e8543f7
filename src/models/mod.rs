//! Data models
//!
//! Recipes, users, and form state exchanged with the recipe API.

mod draft;
mod ingredient;
mod query;
mod rating;
mod recipe;
mod user;

pub use draft::{
    DraftError, FieldError, IngredientPayload, RecipeDraft, RecipePayload, REMIX_SUFFIX,
    REMIX_TAG,
};
pub use ingredient::{Ingredient, IngredientField, Step};
pub use query::{RecipeQuery, SortKey};
pub use rating::{Rating, RatingError, RatingRequest, MAX_RATING, MIN_RATING};
pub use recipe::{Difficulty, Recipe, RecipeSummary, NO_IMAGE};
pub use user::{
    can_modify_recipe, validate_password, visible_users, Claims, PasswordError, ProfileUpdate,
    Role, User, DELETED_USERNAME,
};
