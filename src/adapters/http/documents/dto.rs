//! Data Transfer Objects for the document, export, and preview endpoints.
//!
//! These types define the JSON structure for API requests and responses.
//! Quota limits serialize as `null` when the owner is unlimited.

use serde::{Deserialize, Serialize};

use crate::application::handlers::{ListDocumentsResult, SaveDocumentResult};
use crate::domain::document::Document;
use crate::domain::quota::QuotaDecision;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create or update a document.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveDocumentRequest {
    /// Existing document id; absent, empty, or nil creates a new document.
    #[serde(default)]
    pub id: Option<String>,
    /// Explicit title; blank derives one from the content.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: String,
}

/// Request to export markdown as PDF or Word.
///
/// With `document_id` the stored document is exported; otherwise `content`
/// and `title` are used as given.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Request to render a preview.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewRequest {
    #[serde(default)]
    pub content: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Full document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Document> for DocumentResponse {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id().to_string(),
            title: doc.title().to_string(),
            content: doc.content().to_string(),
            created_at: doc.created_at().to_rfc3339(),
            updated_at: doc.updated_at().to_rfc3339(),
        }
    }
}

/// Document list with the caller's quota standing.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentResponse>,
    pub document_count: u32,
    /// `None` (null) means unlimited.
    pub document_limit: Option<u32>,
    pub unlimited: bool,
}

impl From<ListDocumentsResult> for DocumentListResponse {
    fn from(result: ListDocumentsResult) -> Self {
        Self {
            documents: result.documents.iter().map(DocumentResponse::from).collect(),
            document_count: result.quota.current_count,
            document_limit: result.quota.limit.max(),
            unlimited: result.quota.limit.max().is_none(),
        }
    }
}

/// Outcome of a save.
#[derive(Debug, Clone, Serialize)]
pub struct SaveDocumentResponse {
    pub id: String,
    pub title: String,
    pub created: bool,
    pub updated_at: String,
    pub document_count: u32,
    pub document_limit: Option<u32>,
}

impl From<SaveDocumentResult> for SaveDocumentResponse {
    fn from(result: SaveDocumentResult) -> Self {
        Self {
            id: result.document.id().to_string(),
            title: result.document.title().to_string(),
            created: result.created,
            updated_at: result.document.updated_at().to_rfc3339(),
            document_count: result.quota.current_count,
            document_limit: result.quota.limit.max(),
        }
    }
}

/// Quota status.
#[derive(Debug, Clone, Serialize)]
pub struct QuotaResponse {
    /// Whether one more document may be created.
    pub allowed: bool,
    pub document_count: u32,
    pub document_limit: Option<u32>,
    pub unlimited: bool,
}

impl From<QuotaDecision> for QuotaResponse {
    fn from(decision: QuotaDecision) -> Self {
        Self {
            allowed: decision.allowed,
            document_count: decision.current_count,
            document_limit: decision.limit.max(),
            unlimited: decision.limit.max().is_none(),
        }
    }
}

/// Rendered preview fragment.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewResponse {
    pub html: String,
}

/// Liveness probe body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}
