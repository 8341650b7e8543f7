//! Recipe Share status tool
//!
//! Provides runtime status information about the service.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::session::SessionSummary;

/// Usage guide for AI assistants
pub const RECIPE_INSTRUCTIONS: &str = r#"
# Recipe Share Instructions

This guide explains how to work with recipes through the Recipe Share tools.

## Getting Started

Most tools need a logged-in session:

```
login(username: "cook", password: "Secret123")
```

The session refreshes itself when the access token expires. `logout` ends it.
`recipeshare_status` shows whether you are logged in and as whom.

## Finding Recipes

```
search_recipes(search: "chili", sort: "total_time_asc")
get_recipe(id: 7)
```

Sort keys: `recipe_name_asc`, `recipe_name_desc`, `cuisine_asc`, `cuisine_desc`,
`total_time_asc`, `total_time_desc`, `difficulty_asc`, `difficulty_desc`,
`servings_asc`, `servings_desc`. Omit `sort` for the default order.

`get_recipe` reports `can_modify`: only the owner or an admin may edit or
delete a recipe.

## Measurement Units

Units are normalized before saving. Common spellings map to a short
canonical form:

| You type | Saved as |
|----------|----------|
| tablespoons, Tbsp, tbs | tbsp |
| teaspoon, tsps | tsp |
| cups, c | cup |
| fluid ounces, fl. oz | fl oz |
| grams, gr | g |
| pounds, lbs | lb |

Small typos are corrected ("tablespon" becomes "tbsp"). Anything not
recognized is kept exactly as typed, so custom units like "handful" are fine.
Use `normalize_unit` to preview and `list_unit_aliases` to see every spelling.

## Creating and Editing

```
create_recipe(
  recipe_name: "Weeknight Chili",
  description: "Hearty and quick",
  cuisine: "Tex-Mex",
  prep_time: 15,
  cook_time: 45,
  servings: 6,
  difficulty: "Medium",
  ingredients: [{name: "Kidney beans", amount: "2", unit: "cans"}],
  steps: ["Brown the beef", "Add everything else and simmer"],
  tags: ["spicy"]
)
```

Required: name, description, cuisine, difficulty (Easy, Medium, Hard), prep
and cook time in minutes, servings above zero. Every ingredient needs a name
and every step needs text. Blank image slots are dropped.
Validation problems come back as `field_errors` instead of saving.

`update_recipe` takes the same fields; anything omitted stays as it is. Lists
(ingredients, steps, images, tags) are replaced as a whole when given.

`reorder_recipe_steps(id, order: [2, 0, 1])` lists current zero-based step
positions in their new order. Steps are renumbered from 1.

## Spicing Up

`spice_up_recipe(id)` saves your own copy of a recipe named
"<name> (Spiced Up)", tagged "remix" and linked to the original. Pass any
recipe fields to change the copy before it is saved.

## Deleting

`delete_recipe` and `admin_delete_user` need `confirm: true`. Without it they
return `requires_confirm` and change nothing.

## Accounts

- `register` and `reset_password` require a password of at least 8
  characters with a number and an uppercase letter.
- Changing the password through `update_profile` logs you out.
- Admins can list users, change roles and delete accounts.
"#;

/// Runtime status of the service
#[derive(Debug, Clone, Serialize)]
pub struct RecipeShareStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// API information
    pub api_url: String,
    pub session: SessionSummary,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    api_url: String,
}

impl StatusTracker {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            start_time: Instant::now(),
            api_url: api_url.into(),
        }
    }

    /// Get the current status
    pub fn get_status(&self, session: SessionSummary) -> RecipeShareStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        RecipeShareStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            api_url: self.api_url.clone(),
            session,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
