//! HTTP adapter for documents, export, and preview.
//!
//! - `GET /api/documents` - List documents with count and limit
//! - `POST /api/documents` - Create or update a document
//! - `GET /api/documents/quota` - Quota status
//! - `GET /api/documents/:id` - Fetch a document
//! - `DELETE /api/documents/:id` - Delete a document
//! - `POST /api/export/pdf` - Download as PDF
//! - `POST /api/export/word` - Download as .docx
//! - `POST /api/preview` - Render an HTML preview
//! - `GET /health` - Liveness

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::DocumentAppState;
pub use routes::{api_router, document_routes, export_routes};
