//! End-to-end integration tests for the recetario HTTP API.
//!
//! Tests exercise the full stack: HTTP request -> axum router -> handler ->
//! RecipeStore -> SQLite -> HTTP response.
//!
//! Each test creates a fresh AppState backed by an in-memory SQLite database
//! (seeded with the Stracciatella starter data). Tests use
//! `tower::ServiceExt::oneshot` to send requests directly to the router
//! without starting a network server.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;

use recetario_server::router::build_router;
use recetario_server::state::AppState;

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Creates a fresh router backed by an in-memory seeded database.
///
/// Asset paths point nowhere; API tests never touch them.
fn test_app() -> Router {
    let state = AppState::in_memory("static", "templates/index.html")
        .expect("failed to create in-memory AppState");
    build_router(state)
}

/// Creates a router plus an on-disk asset fixture for frontend tests.
///
/// Layout: `<base>/static/{app.js,styles.css}`, `<base>/templates/index.html`,
/// and `<base>/secret.txt` sitting outside the static root for the
/// containment test.
fn asset_app() -> Router {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    let base: PathBuf = std::env::temp_dir().join(format!(
        "recetario-test-{}-{}",
        std::process::id(),
        n
    ));
    let static_dir = base.join("static");
    std::fs::create_dir_all(&static_dir).unwrap();
    std::fs::write(static_dir.join("app.js"), "console.log('hola');\n").unwrap();
    std::fs::write(static_dir.join("styles.css"), "body { margin: 0; }\n").unwrap();
    std::fs::write(base.join("secret.txt"), "fuera del root\n").unwrap();
    let templates = base.join("templates");
    std::fs::create_dir_all(&templates).unwrap();
    std::fs::write(
        templates.join("index.html"),
        "<!doctype html><html><head><title>Recetario</title></head></html>\n",
    )
    .unwrap();

    let state = AppState::in_memory(static_dir, templates.join("index.html"))
        .expect("failed to create in-memory AppState");
    build_router(state)
}

/// Sends a request and returns the raw response.
async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

/// Sends a GET request and returns (status, json).
async fn get_json(app: &Router, path: &str) -> (StatusCode, serde_json::Value) {
    let response = send(
        app,
        Request::builder().uri(path).body(Body::empty()).unwrap(),
    )
    .await;
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap_or(json!(null));
    (status, json)
}

/// Sends a POST request with a JSON body and returns (status, json).
async fn post_json(
    app: &Router,
    path: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = send(
        app,
        Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
    )
    .await;
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap_or(json!(null));
    (status, json)
}

/// Looks up a seeded ingredient id by name.
async fn ingredient_id(app: &Router, name: &str) -> i64 {
    let (status, body) = get_json(app, "/api/ingredients").await;
    assert_eq!(status, StatusCode::OK);
    body.as_array()
        .unwrap()
        .iter()
        .find(|i| i["name"] == name)
        .unwrap_or_else(|| panic!("ingredient {name} not found"))["id"]
        .as_i64()
        .unwrap()
}

/// Id of the seeded Stracciatella recipe.
async fn seeded_recipe_id(app: &Router) -> i64 {
    let (status, body) = get_json(app, "/api/recipes").await;
    assert_eq!(status, StatusCode::OK);
    body.as_array().unwrap()[0]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Recipes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_recipes_seeded() {
    let app = test_app();
    let (status, body) = get_json(&app, "/api/recipes").await;
    assert_eq!(status, StatusCode::OK);

    let recipes = body.as_array().unwrap();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0]["name"], "Stracciatella");
    assert_eq!(recipes[0]["notes"], "Receta base de ejemplo para arrancar.");
}

#[tokio::test]
async fn test_create_recipe_and_list() {
    let app = test_app();
    let leche = ingredient_id(&app, "Leche entera").await;
    let sacarosa = ingredient_id(&app, "Sacarosa").await;

    let (status, body) = post_json(
        &app,
        "/api/recipes",
        json!({
            "name": "Mantecado",
            "notes": "Con canela",
            "items": [
                { "ingredient_id": leche, "grams_per_kg": 600.0 },
                { "ingredient_id": sacarosa, "grams_per_kg": 180.0 },
            ],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Mantecado");
    assert_eq!(body["notes"], "Con canela");
    assert!(body["id"].as_i64().unwrap() > 0);

    let (_, recipes) = get_json(&app, "/api/recipes").await;
    let names: Vec<_> = recipes
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Mantecado", "Stracciatella"]);
}

#[tokio::test]
async fn test_create_recipe_duplicate_name() {
    let app = test_app();
    let leche = ingredient_id(&app, "Leche entera").await;

    let (status, body) = post_json(
        &app,
        "/api/recipes",
        json!({
            "name": "Stracciatella",
            "notes": "",
            "items": [{ "ingredient_id": leche, "grams_per_kg": 400.0 }],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Ya existe una receta con ese nombre.");
}

#[tokio::test]
async fn test_create_recipe_repeated_ingredient_leaves_catalog_unchanged() {
    let app = test_app();
    let leche = ingredient_id(&app, "Leche entera").await;

    let (status, body) = post_json(
        &app,
        "/api/recipes",
        json!({
            "name": "Doble leche",
            "notes": "",
            "items": [
                { "ingredient_id": leche, "grams_per_kg": 300.0 },
                { "ingredient_id": leche, "grams_per_kg": 200.0 },
            ],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "No repitas ingredientes dentro de la misma receta."
    );

    let (_, recipes) = get_json(&app, "/api/recipes").await;
    assert_eq!(recipes.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_recipe_empty_body_defaults() {
    let app = test_app();
    let (status, body) = post_json(&app, "/api/recipes", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "El nombre de la receta es obligatorio.");
}

// ---------------------------------------------------------------------------
// Scaling
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_calculate_stracciatella_two_kg() {
    let app = test_app();
    let id = seeded_recipe_id(&app).await;

    let (status, body) =
        get_json(&app, &format!("/api/recipes/{id}/calculate?kg=2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "recipe": "Stracciatella",
            "kg": 2.0,
            "result": [
                { "ingredient": "LPD", "grams": 166.0 },
                { "ingredient": "Leche entera", "grams": 666.0 },
                { "ingredient": "Nata montar", "grams": 584.0 },
                { "ingredient": "Sacarosa", "grams": 416.0 },
                { "ingredient": "Yemas", "grams": 166.0 },
            ],
        })
    );
}

#[tokio::test]
async fn test_calculate_kg_defaults_to_zero() {
    let app = test_app();
    let id = seeded_recipe_id(&app).await;

    let (status, body) = get_json(&app, &format!("/api/recipes/{id}/calculate")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Los kilos deben ser mayores a cero.");
}

#[tokio::test]
async fn test_calculate_rejects_bad_kg() {
    let app = test_app();
    let id = seeded_recipe_id(&app).await;

    for kg in ["-2", "abc"] {
        let (status, body) =
            get_json(&app, &format!("/api/recipes/{id}/calculate?kg={kg}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Los kilos deben ser mayores a cero.");
    }
}

#[tokio::test]
async fn test_calculate_unknown_recipe() {
    let app = test_app();
    let (status, body) = get_json(&app, "/api/recipes/99999/calculate?kg=1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Receta no encontrada.");
}

// ---------------------------------------------------------------------------
// Ingredients
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_ingredients_orders() {
    let app = test_app();

    let (status, body) = get_json(&app, "/api/ingredients").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        ["LPD", "Leche entera", "Nata montar", "Sacarosa", "Yemas"]
    );

    let (_, body) = get_json(&app, "/api/ingredients?order=desc").await;
    let names: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        ["Yemas", "Sacarosa", "Nata montar", "Leche entera", "LPD"]
    );

    // Unknown order values fall back to ascending.
    let (_, body) = get_json(&app, "/api/ingredients?order=sideways").await;
    assert_eq!(body.as_array().unwrap()[0]["name"], "LPD");
}

#[tokio::test]
async fn test_list_ingredients_present_in() {
    let app = test_app();
    let (_, body) = get_json(&app, "/api/ingredients").await;
    let leche = body
        .as_array()
        .unwrap()
        .iter()
        .find(|i| i["name"] == "Leche entera")
        .unwrap();
    assert_eq!(leche["present_in"], json!(["Stracciatella"]));
}

#[tokio::test]
async fn test_create_ingredient() {
    let app = test_app();

    let (status, body) =
        post_json(&app, "/api/ingredients", json!({ "name": "  Canela  " })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Canela");
    assert!(body["id"].as_i64().unwrap() > 0);

    let (status, body) = post_json(&app, "/api/ingredients", json!({ "name": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "El nombre del ingrediente es obligatorio.");

    let (status, body) = post_json(&app, "/api/ingredients", json!({ "name": "Canela" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Ya existe un ingrediente con ese nombre.");
}

#[tokio::test]
async fn test_delete_ingredient_no_content() {
    let app = test_app();
    let (_, created) = post_json(&app, "/api/ingredients", json!({ "name": "Canela" })).await;
    let id = created["id"].as_i64().unwrap();

    let response = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/ingredients/{id}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        response.headers()["content-type"],
        "text/plain; charset=utf-8"
    );
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(body_bytes.is_empty());

    // Gone from the catalog.
    let (_, body) = get_json(&app, "/api/ingredients").await;
    assert!(body
        .as_array()
        .unwrap()
        .iter()
        .all(|i| i["id"].as_i64() != Some(id)));
}

#[tokio::test]
async fn test_delete_ingredient_in_use() {
    let app = test_app();
    let leche = ingredient_id(&app, "Leche entera").await;

    let response = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/ingredients/{leche}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(body["error"], "No se puede borrar: está usado en una receta.");
}

#[tokio::test]
async fn test_delete_ingredient_not_found() {
    let app = test_app();
    let response = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri("/api/ingredients/99999")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(body["error"], "Ingrediente no encontrado.");
}

// ---------------------------------------------------------------------------
// Routing and assets
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_unknown_route_answers_json_404() {
    let app = test_app();
    let (status, body) = get_json(&app, "/api/desserts").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Ruta no encontrada.");
}

#[tokio::test]
async fn test_json_responses_declare_utf8_and_length() {
    let app = test_app();
    let response = send(
        &app,
        Request::builder()
            .uri("/api/recipes")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(
        response.headers()["content-type"],
        "application/json; charset=utf-8"
    );
    assert!(response.headers().contains_key("content-length"));
}

#[tokio::test]
async fn test_index_serves_template_html() {
    let app = asset_app();
    let response = send(
        &app,
        Request::builder().uri("/").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "text/html; charset=utf-8"
    );
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(String::from_utf8(body_bytes.to_vec())
        .unwrap()
        .contains("Recetario"));
}

#[tokio::test]
async fn test_static_files_content_types() {
    let app = asset_app();

    for (path, expected) in [
        ("/static/app.js", "application/javascript; charset=utf-8"),
        ("/static/styles.css", "text/css; charset=utf-8"),
    ] {
        let response = send(
            &app,
            Request::builder().uri(path).body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], expected);
    }
}

#[tokio::test]
async fn test_static_missing_file_is_json_404() {
    let app = asset_app();
    let (status, body) = get_json(&app, "/static/missing.css").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Archivo no encontrado.");
}

#[tokio::test]
async fn test_static_path_traversal_is_contained() {
    let app = asset_app();
    // secret.txt exists one level above the static root; the canonicalized
    // path escapes the root and must answer like a missing file.
    let (status, body) = get_json(&app, "/static/../secret.txt").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Archivo no encontrado.");
}
