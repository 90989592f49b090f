//! Domain records and identifiers for the recipe store.
//!
//! Identifiers are `i64` newtypes aligned with SQLite's `INTEGER PRIMARY KEY`.
//! All records derive serde so the HTTP layer can serialize them directly;
//! newtype ids serialize as their inner number.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a stored recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecipeId(pub i64);

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecipeId({})", self.0)
    }
}

/// Unique identifier for a stored ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IngredientId(pub i64);

impl fmt::Display for IngredientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IngredientId({})", self.0)
    }
}

/// Summary of a stored recipe (for listing and creation responses).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeSummary {
    /// Recipe identifier.
    pub id: RecipeId,
    /// Recipe name (unique).
    pub name: String,
    /// Free-text notes, empty by default.
    pub notes: String,
}

/// A catalog ingredient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient identifier.
    pub id: IngredientId,
    /// Ingredient name (unique).
    pub name: String,
}

/// A catalog ingredient together with the recipes that reference it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientDetail {
    /// Ingredient identifier.
    pub id: IngredientId,
    /// Ingredient name.
    pub name: String,
    /// Names of recipes using this ingredient, sorted ascending.
    pub present_in: Vec<String>,
}

/// One ingredient line in a recipe creation request.
///
/// Missing fields deserialize to zero and are rejected by validation, so a
/// sparse JSON body fails with a message instead of a deserialization error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeItem {
    /// The referenced ingredient.
    #[serde(default)]
    pub ingredient_id: i64,
    /// Grams of this ingredient per kilogram of finished product.
    #[serde(default)]
    pub grams_per_kg: f64,
}

/// Result of scaling a recipe to a batch size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaledRecipe {
    /// Recipe name.
    pub recipe: String,
    /// Requested batch size in kilograms.
    pub kg: f64,
    /// Per-ingredient masses, ordered by ingredient name ascending.
    pub result: Vec<ScaledIngredient>,
}

/// One scaled ingredient line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaledIngredient {
    /// Ingredient name.
    pub ingredient: String,
    /// Required mass in grams, rounded to two decimals.
    pub grams: f64,
}

/// Sort direction for ingredient listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Parses an `order` query value. Anything other than `desc`
    /// (case-insensitive) sorts ascending.
    pub fn from_query(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }

    /// The SQL keyword for this direction.
    pub fn sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}
