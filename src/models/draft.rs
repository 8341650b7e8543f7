//! Recipe draft
//!
//! In-memory form state for creating or editing a recipe. Edits are applied
//! one field at a time the way a form receives them, with per-field errors
//! kept live; `into_payload` runs the full validation before submission.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Difficulty, Ingredient, IngredientField, Recipe, Step};
use crate::units::normalize_unit_in_place;

/// Appended to the name of a spiced-up copy
pub const REMIX_SUFFIX: &str = " (Spiced Up)";

/// Tag added to every spiced-up copy
pub const REMIX_TAG: &str = "remix";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("No {kind} at index {index} (draft has {len})")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Step order must list each of the {expected} current steps exactly once")]
    InvalidOrder { expected: usize },
}

/// A validation message bound to a form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

const EMPTY_INGREDIENT: &str = "Ingredient name cannot be empty";
const EMPTY_STEP: &str = "Step description cannot be empty";

/// Form state for a recipe being created or edited
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeDraft {
    #[serde(default)]
    pub recipe_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cuisine: String,
    #[serde(default)]
    pub prep_time: String,
    #[serde(default)]
    pub cook_time: String,
    #[serde(default)]
    pub servings: String,
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
    pub parent_recipe_id: Option<i64>,
    #[serde(skip)]
    live_errors: BTreeMap<String, String>,
}

/// Ingredient as the create/update endpoints expect it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientPayload {
    pub ingredient_name: String,
    pub amount: String,
    pub measurement_name: String,
}

/// Request body for POST /recipes and PUT /recipes/{id}
#[derive(Debug, Clone, Serialize)]
pub struct RecipePayload {
    pub recipe_name: String,
    pub description: String,
    pub cuisine: String,
    pub prep_time: u32,
    pub cook_time: u32,
    pub servings: u32,
    pub difficulty: String,
    pub ingredients: Vec<IngredientPayload>,
    pub steps: Vec<Step>,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_recipe_id: Option<i64>,
}

fn check_index(kind: &'static str, index: usize, len: usize) -> Result<(), DraftError> {
    if index < len {
        Ok(())
    } else {
        Err(DraftError::IndexOutOfRange { kind, index, len })
    }
}

fn parse_minutes(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok()
}

impl RecipeDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill an edit form from an existing recipe
    pub fn from_recipe(recipe: &Recipe) -> Self {
        let mut draft = Self {
            recipe_name: recipe.recipe_name.clone(),
            description: recipe.description.clone(),
            cuisine: recipe.cuisine.clone(),
            prep_time: recipe.prep_time.map(|t| t.to_string()).unwrap_or_default(),
            cook_time: recipe.cook_time.map(|t| t.to_string()).unwrap_or_default(),
            servings: recipe.servings.map(|s| s.to_string()).unwrap_or_default(),
            difficulty: recipe.difficulty.clone(),
            ingredients: recipe.ingredients.clone(),
            steps: recipe.ordered_steps().into_iter().cloned().collect(),
            images: recipe.images.clone(),
            tags: recipe.tags.clone(),
            parent_recipe_id: recipe.parent_recipe_id,
            live_errors: BTreeMap::new(),
        };
        // The edit form always shows at least one image slot
        if draft.images.is_empty() {
            draft.images.push(String::new());
        }
        draft.renumber_steps();
        draft
    }

    /// Draft for a remix of `source`, linked back to it
    pub fn spice_up(source: &Recipe) -> Self {
        let mut draft = Self::from_recipe(source);
        if !draft.recipe_name.ends_with(REMIX_SUFFIX) {
            draft.recipe_name.push_str(REMIX_SUFFIX);
        }
        draft.parent_recipe_id = Some(source.id);
        draft.add_tag(REMIX_TAG);
        draft
    }

    // ------------------------------------------------------------------
    // Ingredients
    // ------------------------------------------------------------------

    /// Append a blank ingredient row and return its index
    pub fn add_ingredient(&mut self) -> usize {
        self.ingredients.push(Ingredient::default());
        self.ingredients.len() - 1
    }

    pub fn remove_ingredient(&mut self, index: usize) -> Result<Ingredient, DraftError> {
        check_index("ingredient", index, self.ingredients.len())?;
        self.shift_errors("ingredient", index);
        Ok(self.ingredients.remove(index))
    }

    pub fn set_ingredient_field(
        &mut self,
        index: usize,
        field: IngredientField,
        value: &str,
    ) -> Result<(), DraftError> {
        check_index("ingredient", index, self.ingredients.len())?;
        *self.ingredients[index].field_mut(field) = value.to_string();

        // Any edit other than blanking the name clears the row's error
        let key = format!("ingredient_{}", index);
        if field == IngredientField::Name && value.trim().is_empty() {
            self.live_errors.insert(key, EMPTY_INGREDIENT.to_string());
        } else {
            self.live_errors.remove(&key);
        }
        Ok(())
    }

    /// The unit box lost focus: normalize what was typed.
    ///
    /// Returns true if the stored unit changed.
    pub fn commit_ingredient_unit(&mut self, index: usize) -> Result<bool, DraftError> {
        check_index("ingredient", index, self.ingredients.len())?;
        Ok(normalize_unit_in_place(&mut self.ingredients[index].measurement_unit))
    }

    /// Normalize every ingredient unit, returning how many changed
    pub fn normalize_units(&mut self) -> usize {
        self.ingredients
            .iter_mut()
            .filter_map(|ing| normalize_unit_in_place(&mut ing.measurement_unit).then_some(()))
            .count()
    }

    // ------------------------------------------------------------------
    // Steps
    // ------------------------------------------------------------------

    /// Append a blank step and return its index
    pub fn add_step(&mut self) -> usize {
        self.steps.push(Step {
            step_number: self.steps.len() as u32 + 1,
            instruction: String::new(),
        });
        self.steps.len() - 1
    }

    pub fn remove_step(&mut self, index: usize) -> Result<Step, DraftError> {
        check_index("step", index, self.steps.len())?;
        self.shift_errors("step", index);
        let step = self.steps.remove(index);
        self.renumber_steps();
        Ok(step)
    }

    pub fn set_step(&mut self, index: usize, instruction: &str) -> Result<(), DraftError> {
        check_index("step", index, self.steps.len())?;
        self.steps[index].instruction = instruction.to_string();

        let key = format!("step_{}", index);
        if instruction.trim().is_empty() {
            self.live_errors.insert(key, EMPTY_STEP.to_string());
        } else {
            self.live_errors.remove(&key);
        }
        Ok(())
    }

    /// Drag-and-drop reorder: move the step at `from` so it ends up at `to`
    pub fn move_step(&mut self, from: usize, to: usize) -> Result<(), DraftError> {
        let len = self.steps.len();
        check_index("step", from, len)?;
        check_index("step", to, len)?;
        if from == to {
            return Ok(());
        }

        let step = self.steps.remove(from);
        self.steps.insert(to, step);
        self.renumber_steps();

        // Live step errors follow their step
        let mut order: Vec<usize> = (0..len).collect();
        let moved = order.remove(from);
        order.insert(to, moved);
        let old_errors: Vec<(usize, String)> = (0..len)
            .filter_map(|i| {
                self.live_errors
                    .remove(&format!("step_{}", i))
                    .map(|msg| (i, msg))
            })
            .collect();
        for (old_index, msg) in old_errors {
            if let Some(new_index) = order.iter().position(|&i| i == old_index) {
                self.live_errors.insert(format!("step_{}", new_index), msg);
            }
        }
        Ok(())
    }

    /// Apply a full new order, given as the current indices in their new positions
    pub fn reorder_steps(&mut self, order: &[usize]) -> Result<(), DraftError> {
        let len = self.steps.len();
        let mut seen = vec![false; len];
        for &i in order {
            check_index("step", i, len)?;
            seen[i] = true;
        }
        if order.len() != len || seen.iter().any(|s| !s) {
            return Err(DraftError::InvalidOrder { expected: len });
        }

        let steps: Vec<Step> = order.iter().map(|&i| self.steps[i].clone()).collect();
        self.steps = steps;
        self.renumber_steps();

        // Live step errors follow their step
        let old_errors: Vec<(usize, String)> = (0..len)
            .filter_map(|i| {
                self.live_errors
                    .remove(&format!("step_{}", i))
                    .map(|msg| (i, msg))
            })
            .collect();
        for (old_index, msg) in old_errors {
            if let Some(new_index) = order.iter().position(|&i| i == old_index) {
                self.live_errors.insert(format!("step_{}", new_index), msg);
            }
        }
        Ok(())
    }

    fn renumber_steps(&mut self) {
        for (i, step) in self.steps.iter_mut().enumerate() {
            step.step_number = i as u32 + 1;
        }
    }

    // ------------------------------------------------------------------
    // Images and tags
    // ------------------------------------------------------------------

    pub fn add_image(&mut self) -> usize {
        self.images.push(String::new());
        self.images.len() - 1
    }

    pub fn remove_image(&mut self, index: usize) -> Result<String, DraftError> {
        check_index("image", index, self.images.len())?;
        Ok(self.images.remove(index))
    }

    pub fn set_image(&mut self, index: usize, url: &str) -> Result<(), DraftError> {
        check_index("image", index, self.images.len())?;
        self.images[index] = url.to_string();
        Ok(())
    }

    /// Add a tag (trimmed, lower-cased). Returns false for blanks and duplicates.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim().to_lowercase();
        if tag.is_empty() || self.tags.iter().any(|t| t.eq_ignore_ascii_case(&tag)) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        let before = self.tags.len();
        self.tags.retain(|t| !t.eq_ignore_ascii_case(tag));
        self.tags.len() != before
    }

    // ------------------------------------------------------------------
    // Validation and submission
    // ------------------------------------------------------------------

    /// Errors recorded while editing, in field order
    pub fn field_errors(&self) -> Vec<FieldError> {
        self.live_errors
            .iter()
            .map(|(field, message)| FieldError::new(field.clone(), message.clone()))
            .collect()
    }

    /// Full validation of every field
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        let required = [
            ("recipe_name", &self.recipe_name, "Recipe name is required"),
            ("description", &self.description, "Description is required"),
            ("cuisine", &self.cuisine, "Cuisine is required"),
            ("difficulty", &self.difficulty, "Difficulty is required"),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                errors.push(FieldError::new(field, message));
            }
        }

        if parse_minutes(&self.prep_time).is_none() {
            errors.push(FieldError::new("prep_time", "Prep time must be a whole number of minutes"));
        }
        if parse_minutes(&self.cook_time).is_none() {
            errors.push(FieldError::new("cook_time", "Cook time must be a whole number of minutes"));
        }
        match parse_minutes(&self.servings) {
            Some(n) if n > 0 => {}
            _ => errors.push(FieldError::new("servings", "Servings must be a positive whole number")),
        }

        for (i, ing) in self.ingredients.iter().enumerate() {
            if ing.ingredient_name.trim().is_empty() {
                errors.push(FieldError::new(format!("ingredient_{}", i), EMPTY_INGREDIENT));
            }
        }
        for (i, step) in self.steps.iter().enumerate() {
            if step.instruction.trim().is_empty() {
                errors.push(FieldError::new(format!("step_{}", i), EMPTY_STEP));
            }
        }
        errors
    }

    /// Normalize, validate, and build the request body
    pub fn into_payload(mut self, user_id: Option<i64>) -> Result<RecipePayload, Vec<FieldError>> {
        self.normalize_units();
        self.renumber_steps();

        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        let difficulty = match Difficulty::parse(&self.difficulty) {
            Some(d) => d.as_str().to_string(),
            None => self.difficulty.trim().to_string(),
        };

        Ok(RecipePayload {
            recipe_name: self.recipe_name.trim().to_string(),
            description: self.description.trim().to_string(),
            cuisine: self.cuisine.trim().to_string(),
            prep_time: parse_minutes(&self.prep_time).unwrap_or(0),
            cook_time: parse_minutes(&self.cook_time).unwrap_or(0),
            servings: parse_minutes(&self.servings).unwrap_or(1),
            difficulty,
            ingredients: self
                .ingredients
                .into_iter()
                .map(|ing| IngredientPayload {
                    ingredient_name: ing.ingredient_name.trim().to_string(),
                    amount: ing.amount.trim().to_string(),
                    measurement_name: ing.measurement_unit,
                })
                .collect(),
            steps: self
                .steps
                .into_iter()
                .map(|s| Step {
                    step_number: s.step_number,
                    instruction: s.instruction.trim().to_string(),
                })
                .collect(),
            images: self
                .images
                .into_iter()
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty())
                .collect(),
            tags: self.tags,
            user_id,
            parent_recipe_id: self.parent_recipe_id,
        })
    }

    /// Drop the live error for a removed row and shift later ones down
    fn shift_errors(&mut self, kind: &str, removed: usize) {
        let prefix = format!("{}_", kind);
        let keys: Vec<String> = self
            .live_errors
            .keys()
            .filter(|k| k.starts_with(&prefix))
            .cloned()
            .collect();
        let mut shifted = Vec::new();
        for key in keys {
            let msg = match self.live_errors.remove(&key) {
                Some(msg) => msg,
                None => continue,
            };
            let index: usize = match key[prefix.len()..].parse() {
                Ok(i) => i,
                Err(_) => continue,
            };
            if index > removed {
                shifted.push((format!("{}{}", prefix, index - 1), msg));
            } else if index < removed {
                shifted.push((key, msg));
            }
        }
        self.live_errors.extend(shifted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_draft() -> RecipeDraft {
        let mut draft = RecipeDraft::new();
        draft.recipe_name = "Chili".to_string();
        draft.description = "Hearty".to_string();
        draft.cuisine = "Tex-Mex".to_string();
        draft.prep_time = "15".to_string();
        draft.cook_time = "60".to_string();
        draft.servings = "6".to_string();
        draft.difficulty = "medium".to_string();
        let i = draft.add_ingredient();
        draft.set_ingredient_field(i, IngredientField::Name, "cumin").unwrap();
        draft.set_ingredient_field(i, IngredientField::Amount, "2").unwrap();
        draft.set_ingredient_field(i, IngredientField::Unit, "Teaspoons").unwrap();
        let s = draft.add_step();
        draft.set_step(s, "Brown the beef").unwrap();
        let s = draft.add_step();
        draft.set_step(s, "Simmer").unwrap();
        draft
    }

    fn source_recipe() -> Recipe {
        serde_json::from_str(
            r#"{
                "id": 42,
                "user_id": 3,
                "recipe_name": "Salsa",
                "description": "Fresh",
                "cuisine": "Mexican",
                "prep_time": 10,
                "cook_time": 0,
                "servings": 4,
                "difficulty": "Easy",
                "ingredients": [{"ingredient_name": "tomato", "amount": 4, "measurement_unit": ""}],
                "steps": [
                    {"step_number": 2, "instruction": "Season"},
                    {"step_number": 1, "instruction": "Chop"}
                ],
                "images": [],
                "tags": ["dip"]
            }"#,
        )
        .unwrap()
    }

    fn instructions(draft: &RecipeDraft) -> Vec<&str> {
        draft.steps.iter().map(|s| s.instruction.as_str()).collect()
    }

    fn numbers(draft: &RecipeDraft) -> Vec<u32> {
        draft.steps.iter().map(|s| s.step_number).collect()
    }

    #[test]
    fn test_blank_ingredient_name_sets_live_error() {
        let mut draft = RecipeDraft::new();
        let i = draft.add_ingredient();
        draft.set_ingredient_field(i, IngredientField::Name, "   ").unwrap();
        assert_eq!(
            draft.field_errors(),
            vec![FieldError::new("ingredient_0", EMPTY_INGREDIENT)]
        );

        draft.set_ingredient_field(i, IngredientField::Name, "basil").unwrap();
        assert!(draft.field_errors().is_empty());
    }

    #[test]
    fn test_amount_edit_clears_name_error() {
        let mut draft = RecipeDraft::new();
        let i = draft.add_ingredient();
        draft.set_ingredient_field(i, IngredientField::Name, "").unwrap();
        draft.set_ingredient_field(i, IngredientField::Amount, "3").unwrap();
        assert!(draft.field_errors().is_empty());

        // Still caught on submit
        let fields: Vec<String> = draft.validate().into_iter().map(|e| e.field).collect();
        assert!(fields.contains(&"ingredient_0".to_string()));
    }

    #[test]
    fn test_blank_step_sets_live_error() {
        let mut draft = RecipeDraft::new();
        let s = draft.add_step();
        draft.set_step(s, "").unwrap();
        assert_eq!(draft.field_errors()[0].field, "step_0");
        draft.set_step(s, "Stir").unwrap();
        assert!(draft.field_errors().is_empty());
    }

    #[test]
    fn test_commit_unit_normalizes() {
        let mut draft = filled_draft();
        assert!(draft.commit_ingredient_unit(0).unwrap());
        assert_eq!(draft.ingredients[0].measurement_unit, "tsp");
        assert!(!draft.commit_ingredient_unit(0).unwrap());
    }

    #[test]
    fn test_commit_unit_leaves_blank_alone() {
        let mut draft = RecipeDraft::new();
        let i = draft.add_ingredient();
        assert!(!draft.commit_ingredient_unit(i).unwrap());
        assert_eq!(draft.ingredients[i].measurement_unit, "");
    }

    #[test]
    fn test_commit_unit_out_of_range() {
        let mut draft = RecipeDraft::new();
        assert_eq!(
            draft.commit_ingredient_unit(3),
            Err(DraftError::IndexOutOfRange { kind: "ingredient", index: 3, len: 0 })
        );
    }

    #[test]
    fn test_add_step_numbers_sequentially() {
        let mut draft = RecipeDraft::new();
        draft.add_step();
        draft.add_step();
        draft.add_step();
        assert_eq!(numbers(&draft), vec![1, 2, 3]);
    }

    #[test]
    fn test_remove_step_renumbers() {
        let mut draft = filled_draft();
        draft.add_step();
        draft.set_step(2, "Serve").unwrap();
        let removed = draft.remove_step(0).unwrap();
        assert_eq!(removed.instruction, "Brown the beef");
        assert_eq!(instructions(&draft), vec!["Simmer", "Serve"]);
        assert_eq!(numbers(&draft), vec![1, 2]);
    }

    #[test]
    fn test_remove_ingredient_shifts_errors() {
        let mut draft = RecipeDraft::new();
        draft.add_ingredient();
        draft.add_ingredient();
        draft.add_ingredient();
        draft.set_ingredient_field(0, IngredientField::Name, "").unwrap();
        draft.set_ingredient_field(2, IngredientField::Name, "").unwrap();

        draft.remove_ingredient(0).unwrap();
        let fields: Vec<String> = draft.field_errors().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["ingredient_1"]);
    }

    #[test]
    fn test_move_step_down() {
        let mut draft = RecipeDraft::new();
        for text in ["a", "b", "c", "d"] {
            let s = draft.add_step();
            draft.set_step(s, text).unwrap();
        }
        draft.move_step(0, 2).unwrap();
        assert_eq!(instructions(&draft), vec!["b", "c", "a", "d"]);
        assert_eq!(numbers(&draft), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_move_step_up() {
        let mut draft = RecipeDraft::new();
        for text in ["a", "b", "c"] {
            let s = draft.add_step();
            draft.set_step(s, text).unwrap();
        }
        draft.move_step(2, 0).unwrap();
        assert_eq!(instructions(&draft), vec!["c", "a", "b"]);
        assert_eq!(numbers(&draft), vec![1, 2, 3]);
    }

    #[test]
    fn test_move_step_same_index_is_noop() {
        let mut draft = filled_draft();
        draft.move_step(1, 1).unwrap();
        assert_eq!(instructions(&draft), vec!["Brown the beef", "Simmer"]);
    }

    #[test]
    fn test_move_step_out_of_range() {
        let mut draft = filled_draft();
        assert!(draft.move_step(0, 5).is_err());
        assert!(draft.move_step(9, 0).is_err());
        assert_eq!(instructions(&draft), vec!["Brown the beef", "Simmer"]);
    }

    #[test]
    fn test_move_step_carries_error() {
        let mut draft = RecipeDraft::new();
        draft.add_step();
        draft.add_step();
        draft.set_step(0, "").unwrap();
        draft.set_step(1, "Stir").unwrap();
        draft.move_step(0, 1).unwrap();
        let fields: Vec<String> = draft.field_errors().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["step_1"]);
    }

    #[test]
    fn test_reorder_steps_carries_error() {
        let mut draft = RecipeDraft::new();
        draft.add_step();
        draft.add_step();
        draft.set_step(0, "").unwrap();
        draft.set_step(1, "Stir").unwrap();
        draft.reorder_steps(&[1, 0]).unwrap();
        assert_eq!(instructions(&draft), vec!["Stir", ""]);
        let fields: Vec<String> = draft.field_errors().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["step_1"]);
    }

    #[test]
    fn test_reorder_steps() {
        let mut draft = RecipeDraft::new();
        for text in ["a", "b", "c"] {
            let s = draft.add_step();
            draft.set_step(s, text).unwrap();
        }
        draft.reorder_steps(&[2, 0, 1]).unwrap();
        assert_eq!(instructions(&draft), vec!["c", "a", "b"]);
        assert_eq!(numbers(&draft), vec![1, 2, 3]);
    }

    #[test]
    fn test_reorder_steps_rejects_bad_orders() {
        let mut draft = filled_draft();
        assert_eq!(draft.reorder_steps(&[0]), Err(DraftError::InvalidOrder { expected: 2 }));
        assert_eq!(draft.reorder_steps(&[0, 0]), Err(DraftError::InvalidOrder { expected: 2 }));
        assert!(draft.reorder_steps(&[0, 2]).is_err());
        assert_eq!(instructions(&draft), vec!["Brown the beef", "Simmer"]);
    }

    #[test]
    fn test_tags() {
        let mut draft = RecipeDraft::new();
        assert!(draft.add_tag(" Spicy "));
        assert!(!draft.add_tag("spicy"));
        assert!(!draft.add_tag("  "));
        assert_eq!(draft.tags, vec!["spicy"]);
        assert!(draft.remove_tag("SPICY"));
        assert!(!draft.remove_tag("spicy"));
    }

    #[test]
    fn test_images() {
        let mut draft = RecipeDraft::new();
        let i = draft.add_image();
        draft.set_image(i, "https://example.com/a.jpg").unwrap();
        assert_eq!(draft.images, vec!["https://example.com/a.jpg"]);
        assert_eq!(draft.remove_image(0).unwrap(), "https://example.com/a.jpg");
        assert!(draft.set_image(0, "x").is_err());
    }

    #[test]
    fn test_validate_empty_draft() {
        let fields: Vec<String> = RecipeDraft::new().validate().into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["recipe_name", "description", "cuisine", "difficulty", "prep_time", "cook_time", "servings"]
        );
    }

    #[test]
    fn test_validate_numbers() {
        let mut draft = filled_draft();
        draft.prep_time = "ten".to_string();
        draft.servings = "0".to_string();
        let fields: Vec<String> = draft.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["prep_time", "servings"]);
    }

    #[test]
    fn test_image_paths_are_not_validated() {
        let mut draft = filled_draft();
        draft.images = vec!["".to_string(), "/uploads/chili.jpg".to_string(), "http://ok".to_string()];
        assert!(draft.validate().is_empty());

        let payload = draft.into_payload(None).unwrap();
        assert_eq!(payload.images, vec!["/uploads/chili.jpg", "http://ok"]);
    }

    #[test]
    fn test_into_payload() {
        let mut draft = filled_draft();
        draft.images = vec!["".to_string(), " https://img/chili.jpg ".to_string()];
        draft.add_tag("dinner");

        let payload = draft.into_payload(Some(9)).unwrap();
        assert_eq!(payload.difficulty, "Medium");
        assert_eq!(payload.prep_time, 15);
        assert_eq!(payload.servings, 6);
        assert_eq!(payload.ingredients[0].measurement_name, "tsp");
        assert_eq!(payload.images, vec!["https://img/chili.jpg"]);
        assert_eq!(payload.user_id, Some(9));

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["ingredients"][0]["measurement_name"], "tsp");
        assert!(json.get("parent_recipe_id").is_none());
    }

    #[test]
    fn test_into_payload_reports_errors() {
        let mut draft = filled_draft();
        draft.set_step(1, " ").unwrap();
        let errors = draft.into_payload(None).unwrap_err();
        assert_eq!(errors, vec![FieldError::new("step_1", EMPTY_STEP)]);
    }

    #[test]
    fn test_into_payload_keeps_unknown_difficulty() {
        let mut draft = filled_draft();
        draft.difficulty = "Chef level".to_string();
        assert_eq!(draft.into_payload(None).unwrap().difficulty, "Chef level");
    }

    #[test]
    fn test_from_recipe() {
        let draft = RecipeDraft::from_recipe(&source_recipe());
        assert_eq!(draft.recipe_name, "Salsa");
        assert_eq!(draft.cook_time, "0");
        assert_eq!(draft.images, vec![""]);
        assert_eq!(instructions(&draft), vec!["Chop", "Season"]);
        assert_eq!(numbers(&draft), vec![1, 2]);
        assert_eq!(draft.parent_recipe_id, None);
    }

    #[test]
    fn test_spice_up() {
        let draft = RecipeDraft::spice_up(&source_recipe());
        assert_eq!(draft.recipe_name, "Salsa (Spiced Up)");
        assert_eq!(draft.parent_recipe_id, Some(42));
        assert_eq!(draft.tags, vec!["dip", "remix"]);

        let payload = draft.into_payload(Some(5)).unwrap();
        assert_eq!(payload.parent_recipe_id, Some(42));
        assert!(payload.images.is_empty());
    }

    #[test]
    fn test_spice_up_twice_keeps_single_suffix() {
        let mut remix = source_recipe();
        remix.id = 43;
        remix.recipe_name = "Salsa (Spiced Up)".to_string();
        remix.tags.push("remix".to_string());
        let draft = RecipeDraft::spice_up(&remix);
        assert_eq!(draft.recipe_name, "Salsa (Spiced Up)");
        assert_eq!(draft.parent_recipe_id, Some(43));
        assert_eq!(draft.tags, vec!["dip", "remix"]);
    }
}
