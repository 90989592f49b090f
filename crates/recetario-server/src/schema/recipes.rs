//! Recipe request types.

use serde::Deserialize;

use recetario_storage::RecipeItem;

/// Request to create a recipe with its ingredient lines.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRecipeRequest {
    /// Recipe name; must be non-empty after trimming.
    #[serde(default)]
    pub name: String,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
    /// Ingredient lines; at least one is required.
    #[serde(default)]
    pub items: Vec<RecipeItem>,
}

/// Query string for the scaling endpoint.
///
/// `kg` arrives as a string and defaults to `"0"` when absent, so a missing
/// parameter fails the positivity check rather than the parse.
#[derive(Debug, Clone, Deserialize)]
pub struct CalculateQuery {
    #[serde(default = "default_kg")]
    pub kg: String,
}

fn default_kg() -> String {
    "0".to_string()
}
