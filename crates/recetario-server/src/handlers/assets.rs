//! Static asset and template handlers.
//!
//! The "template" is a static HTML document read verbatim; there is no
//! templating engine. Static files are served with a content type inferred
//! from the extension. Requested paths are canonicalized and must stay
//! inside the static root; anything that escapes it answers the same 404 as
//! a missing file.

use std::path::{Path as FsPath, PathBuf};

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::error::ApiError;
use crate::state::AppState;

const MSG_FILE_NOT_FOUND: &str = "Archivo no encontrado.";

/// Serves the HTML entry document.
///
/// `GET /`
pub async fn index(State(state): State<AppState>) -> Result<Response, ApiError> {
    let bytes = tokio::fs::read(&*state.template_path)
        .await
        .map_err(|e| ApiError::Internal(format!("failed to read template: {e}")))?;
    Ok(([(header::CONTENT_TYPE, "text/html; charset=utf-8")], bytes).into_response())
}

/// Serves one file from the static root.
///
/// `GET /static/{*path}`
pub async fn static_file(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Response, ApiError> {
    let file = resolve_static(&state.static_dir, &path)
        .await
        .ok_or_else(|| ApiError::NotFound(MSG_FILE_NOT_FOUND.to_string()))?;
    let bytes = tokio::fs::read(&file)
        .await
        .map_err(|_| ApiError::NotFound(MSG_FILE_NOT_FOUND.to_string()))?;
    Ok((
        [(header::CONTENT_TYPE, content_type_for(&file))],
        bytes,
    )
        .into_response())
}

/// Resolves a requested path to a regular file inside the static root.
///
/// Canonicalization fails for missing files, and the prefix check rejects
/// paths that climb out of the root via `..` or symlinks.
async fn resolve_static(root: &FsPath, requested: &str) -> Option<PathBuf> {
    let root = tokio::fs::canonicalize(root).await.ok()?;
    let candidate = tokio::fs::canonicalize(root.join(requested)).await.ok()?;
    if !candidate.starts_with(&root) {
        return None;
    }
    let meta = tokio::fs::metadata(&candidate).await.ok()?;
    if !meta.is_file() {
        return None;
    }
    Some(candidate)
}

/// Content type by file extension; everything unknown is plain text.
fn content_type_for(path: &FsPath) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "application/javascript; charset=utf-8",
        _ => "text/plain; charset=utf-8",
    }
}
