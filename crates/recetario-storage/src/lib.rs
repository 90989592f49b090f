//! Persistence layer for the recetario recipe service.
//!
//! Provides [`RecipeStore`], the single façade over the SQLite database that
//! encapsulates all validation and SQL for recipes, ingredients, and the
//! many-to-many quantities linking them.
//!
//! # Modules
//!
//! - [`error`]: StoreError enum with all failure modes
//! - [`types`]: domain records and identifiers
//! - [`schema`]: SQL schema constants and migration setup
//! - [`store`]: RecipeStore implementation

pub mod error;
pub mod schema;
pub mod store;
pub mod types;

// Re-export key types for ergonomic use.
pub use error::StoreError;
pub use store::RecipeStore;
pub use types::{
    Ingredient, IngredientDetail, IngredientId, RecipeId, RecipeItem, RecipeSummary,
    ScaledIngredient, ScaledRecipe, SortOrder,
};
