//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (save, delete) are kept apart from query handlers
//! (list, get, quota, export, preview).

pub mod handlers;

pub use handlers::{
    // Document handlers
    CheckQuotaHandler, CheckQuotaQuery, DeleteDocumentCommand, DeleteDocumentHandler,
    GetDocumentHandler, GetDocumentQuery, ListDocumentsHandler, ListDocumentsQuery,
    ListDocumentsResult, SaveDocumentCommand, SaveDocumentHandler, SaveDocumentResult,
    // Export handlers
    ExportDocumentCommand, ExportDocumentHandler, ExportSource, PreviewDocumentHandler,
    PreviewDocumentQuery,
};
