//! Ingredient catalog handlers (list, create, delete).

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use recetario_storage::{Ingredient, IngredientDetail, IngredientId, SortOrder};

use crate::error::ApiError;
use crate::schema::ingredients::{CreateIngredientRequest, ListIngredientsQuery};
use crate::state::AppState;

/// Lists all ingredients with the recipes referencing each one.
///
/// `GET /api/ingredients?order=asc|desc`
pub async fn list_ingredients(
    State(state): State<AppState>,
    Query(query): Query<ListIngredientsQuery>,
) -> Result<Json<Vec<IngredientDetail>>, ApiError> {
    let order = SortOrder::from_query(&query.order);
    let store = state.store.lock().await;
    Ok(Json(store.list_ingredients(order)?))
}

/// Creates a catalog ingredient.
///
/// `POST /api/ingredients`
pub async fn create_ingredient(
    State(state): State<AppState>,
    Json(req): Json<CreateIngredientRequest>,
) -> Result<(StatusCode, Json<Ingredient>), ApiError> {
    let mut store = state.store.lock().await;
    let ingredient = store.create_ingredient(&req.name)?;
    Ok((StatusCode::CREATED, Json(ingredient)))
}

/// Deletes an unreferenced ingredient.
///
/// `DELETE /api/ingredients/{id}`
///
/// Success answers 204 with an empty body and an explicit
/// `text/plain; charset=utf-8` content type, which existing clients expect.
pub async fn delete_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let mut store = state.store.lock().await;
    store.delete_ingredient(IngredientId(id))?;
    Ok((
        StatusCode::NO_CONTENT,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
    ))
}
