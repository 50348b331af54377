//! HTTP handlers for document, export, and preview endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error::DocumentApiError;
use crate::adapters::http::middleware::RequireOwner;
use crate::application::handlers::{
    CheckQuotaHandler, CheckQuotaQuery, DeleteDocumentCommand, DeleteDocumentHandler,
    ExportDocumentCommand, ExportDocumentHandler, ExportSource, GetDocumentHandler,
    GetDocumentQuery, ListDocumentsHandler, ListDocumentsQuery, PreviewDocumentHandler,
    PreviewDocumentQuery, SaveDocumentCommand, SaveDocumentHandler,
};
use crate::domain::document::DocumentError;
use crate::domain::foundation::{DocumentId, UserId, ValidationError};
use crate::domain::quota::QuotaPolicy;
use crate::ports::{
    DocumentRenderer, DocumentRepository, ExportFormat, ExportedDocument, MarkdownPreviewer,
};

use super::dto::{
    DocumentListResponse, DocumentResponse, ExportRequest, HealthResponse, PreviewRequest,
    PreviewResponse, QuotaResponse, SaveDocumentRequest, SaveDocumentResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned per request; every field is an `Arc`.
#[derive(Clone)]
pub struct DocumentAppState {
    pub repository: Arc<dyn DocumentRepository>,
    pub quota_policy: Arc<QuotaPolicy>,
    pub renderers: Vec<Arc<dyn DocumentRenderer>>,
    pub previewer: Arc<dyn MarkdownPreviewer>,
}

impl DocumentAppState {
    /// Create handlers on demand from the shared state.
    pub fn list_documents_handler(&self) -> ListDocumentsHandler {
        ListDocumentsHandler::new(self.repository.clone(), self.quota_policy.clone())
    }

    pub fn get_document_handler(&self) -> GetDocumentHandler {
        GetDocumentHandler::new(self.repository.clone())
    }

    pub fn save_document_handler(&self) -> SaveDocumentHandler {
        SaveDocumentHandler::new(self.repository.clone(), self.quota_policy.clone())
    }

    pub fn delete_document_handler(&self) -> DeleteDocumentHandler {
        DeleteDocumentHandler::new(self.repository.clone())
    }

    pub fn check_quota_handler(&self) -> CheckQuotaHandler {
        CheckQuotaHandler::new(self.repository.clone(), self.quota_policy.clone())
    }

    pub fn export_document_handler(&self) -> ExportDocumentHandler {
        ExportDocumentHandler::new(self.repository.clone(), self.renderers.clone())
    }

    pub fn preview_document_handler(&self) -> PreviewDocumentHandler {
        PreviewDocumentHandler::new(self.previewer.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/documents - List the caller's documents, newest first
pub async fn list_documents(
    State(state): State<DocumentAppState>,
    RequireOwner(owner): RequireOwner,
) -> Result<impl IntoResponse, DocumentApiError> {
    let result = state
        .list_documents_handler()
        .handle(ListDocumentsQuery { owner })
        .await?;

    Ok(Json(DocumentListResponse::from(result)))
}

/// GET /api/documents/:id - Fetch one owned document
pub async fn get_document(
    State(state): State<DocumentAppState>,
    RequireOwner(owner): RequireOwner,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, DocumentApiError> {
    let query = GetDocumentQuery {
        document_id: path_document_id(&id)?,
        user_id: owner.id,
    };

    let document = state.get_document_handler().handle(query).await?;
    Ok(Json(DocumentResponse::from(&document)))
}

/// GET /api/documents/quota - Current count against the caller's cap
pub async fn get_quota(
    State(state): State<DocumentAppState>,
    RequireOwner(owner): RequireOwner,
) -> Result<impl IntoResponse, DocumentApiError> {
    let decision = state
        .check_quota_handler()
        .handle(CheckQuotaQuery { owner })
        .await?;

    Ok(Json(QuotaResponse::from(decision)))
}

/// GET /health - Liveness
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST/DELETE endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/documents - Create or update a document
pub async fn save_document(
    State(state): State<DocumentAppState>,
    RequireOwner(owner): RequireOwner,
    Json(request): Json<SaveDocumentRequest>,
) -> Result<impl IntoResponse, DocumentApiError> {
    let cmd = SaveDocumentCommand {
        owner,
        document_id: body_document_id(request.id.as_deref(), "id")?,
        title: request.title,
        content: request.content,
    };

    let result = state.save_document_handler().handle(cmd).await?;
    let status = if result.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(SaveDocumentResponse::from(result))))
}

/// DELETE /api/documents/:id - Delete an owned document
pub async fn delete_document(
    State(state): State<DocumentAppState>,
    RequireOwner(owner): RequireOwner,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, DocumentApiError> {
    let cmd = DeleteDocumentCommand {
        document_id: path_document_id(&id)?,
        user_id: owner.id,
    };

    if state.delete_document_handler().handle(cmd).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(DocumentError::NotFoundOrForbidden.into())
    }
}

/// POST /api/export/pdf - Download markdown as PDF
pub async fn export_pdf(
    State(state): State<DocumentAppState>,
    RequireOwner(owner): RequireOwner,
    Json(request): Json<ExportRequest>,
) -> Result<Response, DocumentApiError> {
    export(state, owner.id, ExportFormat::Pdf, request).await
}

/// POST /api/export/word - Download markdown as .docx
pub async fn export_word(
    State(state): State<DocumentAppState>,
    RequireOwner(owner): RequireOwner,
    Json(request): Json<ExportRequest>,
) -> Result<Response, DocumentApiError> {
    export(state, owner.id, ExportFormat::Word, request).await
}

/// POST /api/preview - Render markdown to an HTML fragment
pub async fn preview(
    State(state): State<DocumentAppState>,
    RequireOwner(_owner): RequireOwner,
    Json(request): Json<PreviewRequest>,
) -> Result<impl IntoResponse, DocumentApiError> {
    let html = state
        .preview_document_handler()
        .handle(PreviewDocumentQuery {
            content: request.content,
        })?;

    Ok(Json(PreviewResponse { html }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════════

async fn export(
    state: DocumentAppState,
    user_id: UserId,
    format: ExportFormat,
    request: ExportRequest,
) -> Result<Response, DocumentApiError> {
    let source = match body_document_id(request.document_id.as_deref(), "document_id")? {
        Some(id) => ExportSource::Stored(id),
        None => ExportSource::Inline {
            content: request.content.unwrap_or_default(),
            title: request.title,
        },
    };

    let exported = state
        .export_document_handler()
        .handle(ExportDocumentCommand {
            user_id,
            format,
            source,
        })
        .await?;

    attachment(exported)
}

/// Builds the download response for an exported document.
fn attachment(exported: ExportedDocument) -> Result<Response, DocumentApiError> {
    let content_type = HeaderValue::from_str(&exported.content_type)
        .map_err(|e| DocumentError::export_failed(e.to_string()))?;
    let disposition = HeaderValue::from_str(&content_disposition(&exported.filename))
        .map_err(|e| DocumentError::export_failed(e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        exported.content,
    )
        .into_response())
}

/// `attachment` disposition with an ASCII fallback and an RFC 5987 UTF-8 name.
fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let mut encoded = String::with_capacity(filename.len() * 3);
    for byte in filename.bytes() {
        if byte.is_ascii_alphanumeric() || b"!#$&+-.^_`|~".contains(&byte) {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback, encoded
    )
}

/// Ids in the path that do not parse cannot name an owned document.
fn path_document_id(raw: &str) -> Result<DocumentId, DocumentError> {
    raw.parse::<DocumentId>()
        .map_err(|_| DocumentError::NotFoundOrForbidden)
}

/// Optional id from a request body; empty means absent.
fn body_document_id(raw: Option<&str>, field: &str) -> Result<Option<DocumentId>, DocumentError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<DocumentId>()
            .map(Some)
            .map_err(|_| {
                DocumentError::from(ValidationError::invalid_format(field, "must be a UUID"))
            }),
    }
}
