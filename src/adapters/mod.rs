//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - Document persistence on PostgreSQL (`sqlx`)
//! - `memory` - In-memory document store for tests and local runs
//! - `export` - PDF, Word, and HTML preview renderers
//! - `http` - REST API (`axum`)

pub mod export;
pub mod http;
pub mod memory;
pub mod postgres;

pub use export::{HtmlPreviewRenderer, PdfLayout, PdfRenderer, WordRenderer};
pub use memory::InMemoryDocumentRepository;
pub use postgres::PostgresDocumentRepository;
