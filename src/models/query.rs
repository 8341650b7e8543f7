//! Recipe search and sort options

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sort orders the recipe listing understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Default,
    RecipeNameAsc,
    RecipeNameDesc,
    CuisineAsc,
    CuisineDesc,
    TotalTimeAsc,
    TotalTimeDesc,
    DifficultyAsc,
    DifficultyDesc,
    ServingsAsc,
    ServingsDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 11] = [
        SortKey::Default,
        SortKey::RecipeNameAsc,
        SortKey::RecipeNameDesc,
        SortKey::CuisineAsc,
        SortKey::CuisineDesc,
        SortKey::TotalTimeAsc,
        SortKey::TotalTimeDesc,
        SortKey::DifficultyAsc,
        SortKey::DifficultyDesc,
        SortKey::ServingsAsc,
        SortKey::ServingsDesc,
    ];

    /// Value sent as the `sort` query parameter
    pub fn as_param(&self) -> &'static str {
        match self {
            SortKey::Default => "",
            SortKey::RecipeNameAsc => "recipe_name_asc",
            SortKey::RecipeNameDesc => "recipe_name_desc",
            SortKey::CuisineAsc => "cuisine_asc",
            SortKey::CuisineDesc => "cuisine_desc",
            SortKey::TotalTimeAsc => "total_time_asc",
            SortKey::TotalTimeDesc => "total_time_desc",
            SortKey::DifficultyAsc => "difficulty_asc",
            SortKey::DifficultyDesc => "difficulty_desc",
            SortKey::ServingsAsc => "servings_asc",
            SortKey::ServingsDesc => "servings_desc",
        }
    }

    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Default => "Default",
            SortKey::RecipeNameAsc => "Name (A-Z)",
            SortKey::RecipeNameDesc => "Name (Z-A)",
            SortKey::CuisineAsc => "Cuisine (A-Z)",
            SortKey::CuisineDesc => "Cuisine (Z-A)",
            SortKey::TotalTimeAsc => "Time (Short-Long)",
            SortKey::TotalTimeDesc => "Time (Long-Short)",
            SortKey::DifficultyAsc => "Difficulty (Easy → Hard)",
            SortKey::DifficultyDesc => "Difficulty (Hard → Easy)",
            SortKey::ServingsAsc => "Servings (Fewest First)",
            SortKey::ServingsDesc => "Servings (Most First)",
        }
    }

    /// Parse a query parameter value; blank means the server default
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.iter().copied().find(|k| k.as_param() == s)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Search text plus sort order for GET /recipes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeQuery {
    pub search: String,
    pub sort: SortKey,
}

impl RecipeQuery {
    pub fn new(search: Option<&str>, sort: SortKey) -> Self {
        Self {
            search: search.map(|s| s.trim().to_string()).unwrap_or_default(),
            sort,
        }
    }

    /// Both parameters are always sent, empty when unset
    pub fn to_params(&self) -> [(&'static str, String); 2] {
        [
            ("search", self.search.clone()),
            ("sort", self.sort.as_param().to_string()),
        ]
    }
}
