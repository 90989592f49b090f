//! HTTP handler modules for the recetario API.
//!
//! Each sub-module implements thin handlers that parse requests, acquire the
//! store lock, delegate to [`RecipeStore`], and return JSON responses. No
//! business logic lives in handlers.
//!
//! [`RecipeStore`]: recetario_storage::RecipeStore

pub mod assets;
pub mod ingredients;
pub mod recipes;

use crate::error::ApiError;

/// Fallback for any unmatched method/path combination.
pub async fn route_not_found() -> ApiError {
    ApiError::NotFound("Ruta no encontrada.".to_string())
}
