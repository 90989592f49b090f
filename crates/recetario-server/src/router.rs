//! Router assembly for the recetario HTTP API.
//!
//! [`build_router`] wires all handler functions to their routes with CORS
//! and tracing middleware layers.

use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderValue;
use axum::middleware::map_response;
use axum::response::Response;
use axum::routing::{delete, get};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the complete axum router with all API and asset routes.
///
/// Routes use axum 0.8 `/{param}` path syntax. CORS is permissive.
/// TraceLayer provides request-level logging via tracing. Anything that
/// matches no route answers a JSON 404.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Frontend
        .route("/", get(handlers::assets::index))
        .route("/static/{*path}", get(handlers::assets::static_file))
        // Recipes
        .route(
            "/api/recipes",
            get(handlers::recipes::list_recipes).post(handlers::recipes::create_recipe),
        )
        .route(
            "/api/recipes/{id}/calculate",
            get(handlers::recipes::calculate_recipe),
        )
        // Ingredient catalog
        .route(
            "/api/ingredients",
            get(handlers::ingredients::list_ingredients)
                .post(handlers::ingredients::create_ingredient),
        )
        .route(
            "/api/ingredients/{id}",
            delete(handlers::ingredients::delete_ingredient),
        )
        .fallback(handlers::route_not_found)
        .layer(map_response(declare_json_charset))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Rewrites `application/json` content types to declare UTF-8 explicitly,
/// which existing API clients expect on every JSON response.
async fn declare_json_charset(mut response: Response) -> Response {
    let is_bare_json = response
        .headers()
        .get(CONTENT_TYPE)
        .is_some_and(|value| value == "application/json");
    if is_bare_json {
        response.headers_mut().insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
    }
    response
}
