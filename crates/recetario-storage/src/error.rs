//! Storage error types for recetario-storage.
//!
//! [`StoreError`] covers all anticipated failure modes of the recipe store.
//! The domain variants carry the user-facing message verbatim; the HTTP layer
//! decides status codes from the variant, never from the text.

use thiserror::Error;

/// Errors produced by recipe store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A request failed validation (empty name, non-positive quantity, ...).
    #[error("{0}")]
    Validation(String),

    /// A referenced recipe or ingredient does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A unique-name constraint was violated.
    #[error("{0}")]
    Conflict(String),

    /// An ingredient deletion was blocked by existing recipe references.
    #[error("{0}")]
    InUse(String),

    /// The underlying SQLite call failed.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migration(String),
}
