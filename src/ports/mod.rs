//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `DocumentRepository` - Owner-scoped persistence with quota-guarded insert
//! - `DocumentRenderer` - Parsed markdown to PDF / Word bytes
//! - `MarkdownPreviewer` - Markdown to an HTML preview fragment

mod document_export_service;
mod document_repository;

pub use document_export_service::{
    DocumentRenderer, ExportError, ExportFormat, ExportedDocument, MarkdownPreviewer,
};
pub use document_repository::{DocumentRepository, InsertOutcome};
