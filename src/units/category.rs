//! Unit categories
//!
//! Groups canonical units by what they measure.

use serde::{Deserialize, Serialize};

use super::normalizer::normalize_unit;

/// Category of a measurement unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitCategory {
    /// Weight/mass units (g, oz, lb, kg)
    Weight,
    /// Volume units (ml, tbsp, cup, etc.)
    Volume,
    /// Count/discrete units (clove, slice, can)
    Count,
    /// Anything else, including a pinch and unrecognized text
    Custom,
}

impl UnitCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitCategory::Weight => "weight",
            UnitCategory::Volume => "volume",
            UnitCategory::Count => "count",
            UnitCategory::Custom => "custom",
        }
    }
}

/// Determine the category of a unit string, normalizing it first
pub fn categorize_unit(unit: &str) -> UnitCategory {
    match normalize_unit(unit).as_str() {
        "g" | "kg" | "oz" | "lb" => UnitCategory::Weight,
        "tsp" | "tbsp" | "cup" | "fl oz" | "ml" | "l" | "pt" | "qt" | "gal" => UnitCategory::Volume,
        "clove" | "slice" | "can" => UnitCategory::Count,
        _ => UnitCategory::Custom,
    }
}
