//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod document;
pub mod export;

pub use document::{
    CheckQuotaHandler, CheckQuotaQuery, DeleteDocumentCommand, DeleteDocumentHandler,
    GetDocumentHandler, GetDocumentQuery, ListDocumentsHandler, ListDocumentsQuery,
    ListDocumentsResult, SaveDocumentCommand, SaveDocumentHandler, SaveDocumentResult,
};
pub use export::{
    ExportDocumentCommand, ExportDocumentHandler, ExportSource, PreviewDocumentHandler,
    PreviewDocumentQuery,
};
