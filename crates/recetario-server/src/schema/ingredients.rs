//! Ingredient catalog request types.

use serde::Deserialize;

/// Request to create a catalog ingredient.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateIngredientRequest {
    /// Ingredient name; must be non-empty after trimming.
    #[serde(default)]
    pub name: String,
}

/// Query string for the ingredient listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ListIngredientsQuery {
    /// `asc` or `desc`; anything else sorts ascending.
    #[serde(default = "default_order")]
    pub order: String,
}

fn default_order() -> String {
    "asc".to_string()
}
