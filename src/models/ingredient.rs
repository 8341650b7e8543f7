//! Ingredient and step models

use serde::{Deserialize, Deserializer, Serialize};

/// An ingredient line as typed: name, amount, and measurement unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub ingredient_name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub amount: String,
    /// The create form posts this as `measurement_name`, the API returns `measurement_unit`
    #[serde(default, alias = "measurement_name")]
    pub measurement_unit: String,
}

/// One numbered instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub step_number: u32,
    pub instruction: String,
}

/// Which text box of an ingredient row is being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngredientField {
    Name,
    Amount,
    Unit,
}

impl Ingredient {
    pub fn new(name: &str, amount: &str, unit: &str) -> Self {
        Self {
            ingredient_name: name.to_string(),
            amount: amount.to_string(),
            measurement_unit: unit.to_string(),
        }
    }

    pub fn field_mut(&mut self, field: IngredientField) -> &mut String {
        match field {
            IngredientField::Name => &mut self.ingredient_name,
            IngredientField::Amount => &mut self.amount,
            IngredientField::Unit => &mut self.measurement_unit,
        }
    }

    /// "2 cup of flour", as the detail page lists it
    pub fn display_line(&self) -> String {
        let quantity = [self.amount.trim(), self.measurement_unit.trim()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        if quantity.is_empty() {
            self.ingredient_name.clone()
        } else {
            format!("{} of {}", quantity, self.ingredient_name)
        }
    }
}

/// Accept `"1.5"`, `1.5`, `2` or `null` for an amount
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<Amount>::deserialize(deserializer)? {
        Some(Amount::Text(s)) => s,
        Some(Amount::Int(n)) => n.to_string(),
        Some(Amount::Float(f)) => f.to_string(),
        None => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_accepts_numbers_and_text() {
        let ing: Ingredient = serde_json::from_str(
            r#"{"ingredient_name": "flour", "amount": 2, "measurement_unit": "cup"}"#,
        )
        .unwrap();
        assert_eq!(ing.amount, "2");

        let ing: Ingredient =
            serde_json::from_str(r#"{"ingredient_name": "salt", "amount": 0.5}"#).unwrap();
        assert_eq!(ing.amount, "0.5");
        assert_eq!(ing.measurement_unit, "");

        let ing: Ingredient =
            serde_json::from_str(r#"{"ingredient_name": "egg", "amount": "1 1/2"}"#).unwrap();
        assert_eq!(ing.amount, "1 1/2");

        let ing: Ingredient =
            serde_json::from_str(r#"{"ingredient_name": "egg", "amount": null}"#).unwrap();
        assert_eq!(ing.amount, "");
    }

    #[test]
    fn test_measurement_name_alias() {
        let ing: Ingredient = serde_json::from_str(
            r#"{"ingredient_name": "milk", "amount": "1", "measurement_name": "cups"}"#,
        )
        .unwrap();
        assert_eq!(ing.measurement_unit, "cups");
    }

    #[test]
    fn test_display_line() {
        assert_eq!(Ingredient::new("flour", "2", "cup").display_line(), "2 cup of flour");
        assert_eq!(Ingredient::new("eggs", "3", "").display_line(), "3 of eggs");
        assert_eq!(Ingredient::new("salt", "", "").display_line(), "salt");
    }

    #[test]
    fn test_field_mut() {
        let mut ing = Ingredient::default();
        *ing.field_mut(IngredientField::Unit) = "tbsp".to_string();
        assert_eq!(ing.measurement_unit, "tbsp");
    }
}
