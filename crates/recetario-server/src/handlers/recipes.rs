//! Recipe handlers (list, create, calculate).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use recetario_storage::{RecipeId, RecipeSummary, ScaledRecipe};

use crate::error::ApiError;
use crate::schema::recipes::{CalculateQuery, CreateRecipeRequest};
use crate::state::AppState;

/// Lists all recipes ordered by name.
///
/// `GET /api/recipes`
pub async fn list_recipes(
    State(state): State<AppState>,
) -> Result<Json<Vec<RecipeSummary>>, ApiError> {
    let store = state.store.lock().await;
    Ok(Json(store.list_recipes()?))
}

/// Creates a recipe with its ingredient lines atomically.
///
/// `POST /api/recipes`
pub async fn create_recipe(
    State(state): State<AppState>,
    Json(req): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeSummary>), ApiError> {
    let mut store = state.store.lock().await;
    let recipe = store.create_recipe(&req.name, &req.notes, &req.items)?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

/// Scales a recipe to the requested batch size in kilograms.
///
/// `GET /api/recipes/{id}/calculate?kg=<float>`
pub async fn calculate_recipe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<CalculateQuery>,
) -> Result<Json<ScaledRecipe>, ApiError> {
    let kg: f64 = query
        .kg
        .trim()
        .parse()
        .map_err(|_| ApiError::BadRequest("Los kilos deben ser mayores a cero.".to_string()))?;
    let store = state.store.lock().await;
    Ok(Json(store.calculate_recipe(RecipeId(id), kg)?))
}
