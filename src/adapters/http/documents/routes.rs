//! Axum router configuration for document, export, and preview endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    delete_document, export_pdf, export_word, get_document, get_quota, health, list_documents,
    preview, save_document, DocumentAppState,
};

/// Create the documents API router.
///
/// # Routes
/// - `GET /` - List the caller's documents with count and limit
/// - `POST /` - Create or update a document
/// - `GET /quota` - Quota status
/// - `GET /:id` - Fetch one document
/// - `DELETE /:id` - Delete one document
pub fn document_routes() -> Router<DocumentAppState> {
    Router::new()
        .route("/", get(list_documents).post(save_document))
        .route("/quota", get(get_quota))
        .route("/:id", get(get_document).delete(delete_document))
}

/// Create the export router.
///
/// # Routes
/// - `POST /pdf` - Download as PDF
/// - `POST /word` - Download as .docx
pub fn export_routes() -> Router<DocumentAppState> {
    Router::new()
        .route("/pdf", post(export_pdf))
        .route("/word", post(export_word))
}

/// Create the complete API router.
///
/// Mounts documents at `/api/documents`, exports at `/api/export`, the
/// preview at `/api/preview`, and liveness at `/health`. Middleware layers
/// are added by the binary.
///
/// # Example
///
/// ```ignore
/// let app = api_router().with_state(state);
/// axum::serve(listener, app).await?;
/// ```
pub fn api_router() -> Router<DocumentAppState> {
    Router::new()
        .nest("/api/documents", document_routes())
        .nest("/api/export", export_routes())
        .route("/api/preview", post(preview))
        .route("/health", get(health))
}
