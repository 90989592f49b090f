//! Application state with the shared `RecipeStore` for concurrent access.
//!
//! [`AppState`] wraps the store in `Arc<tokio::sync::Mutex<>>` for use with
//! axum handlers. Uses `tokio::sync::Mutex` (async-aware) instead of
//! `std::sync::Mutex` so handlers await the lock without blocking the tokio
//! runtime; `rusqlite::Connection` is `!Sync`, so an `RwLock` is not an
//! option anyway. SQLite transactions inside the store are the only other
//! concurrency-correctness mechanism.

use std::path::PathBuf;
use std::sync::Arc;

use recetario_storage::RecipeStore;

use crate::error::ApiError;

/// Shared application state for the HTTP server.
///
/// Constructed once in `main` and injected into the router, so there is no
/// global store instance.
#[derive(Clone)]
pub struct AppState {
    /// The shared recipe store (async Mutex -- non-blocking await).
    pub store: Arc<tokio::sync::Mutex<RecipeStore>>,
    /// Root directory for `/static/` assets.
    pub static_dir: Arc<PathBuf>,
    /// The HTML entry document served at `/`.
    pub template_path: Arc<PathBuf>,
}

impl AppState {
    /// Creates a new `AppState` backed by the SQLite database at `db_path`.
    ///
    /// Opening the store applies migrations and seeds starter data.
    pub fn new(
        db_path: &str,
        static_dir: impl Into<PathBuf>,
        template_path: impl Into<PathBuf>,
    ) -> Result<Self, ApiError> {
        let store = RecipeStore::open(db_path)?;
        Ok(AppState {
            store: Arc::new(tokio::sync::Mutex::new(store)),
            static_dir: Arc::new(static_dir.into()),
            template_path: Arc::new(template_path.into()),
        })
    }

    /// Creates a new `AppState` with an in-memory database (for testing).
    pub fn in_memory(
        static_dir: impl Into<PathBuf>,
        template_path: impl Into<PathBuf>,
    ) -> Result<Self, ApiError> {
        let store = RecipeStore::in_memory()?;
        Ok(AppState {
            store: Arc::new(tokio::sync::Mutex::new(store)),
            static_dir: Arc::new(static_dir.into()),
            template_path: Arc::new(template_path.into()),
        })
    }
}
