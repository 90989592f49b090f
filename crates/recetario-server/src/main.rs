//! Binary entrypoint for the recetario HTTP server.
//!
//! Reads configuration from environment variables:
//! - `RECETARIO_DB_PATH`: SQLite database file path (default: "recetas.db")
//! - `RECETARIO_HOST`: listen address (default: "0.0.0.0")
//! - `RECETARIO_PORT`: listen port (default: "5000")
//! - `RECETARIO_STATIC_DIR`: static asset root (default: "static")
//! - `RECETARIO_TEMPLATE_PATH`: HTML entry document
//!   (default: "templates/index.html")

use recetario_server::router::build_router;
use recetario_server::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let db_path =
        std::env::var("RECETARIO_DB_PATH").unwrap_or_else(|_| "recetas.db".to_string());
    let host = std::env::var("RECETARIO_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("RECETARIO_PORT").unwrap_or_else(|_| "5000".to_string());
    let static_dir =
        std::env::var("RECETARIO_STATIC_DIR").unwrap_or_else(|_| "static".to_string());
    let template_path = std::env::var("RECETARIO_TEMPLATE_PATH")
        .unwrap_or_else(|_| "templates/index.html".to_string());

    let state = AppState::new(&db_path, static_dir, template_path)
        .expect("Failed to initialize application state");

    let app = build_router(state);

    let addr = format!("{}:{}", host, port);
    tracing::info!("recetario server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
