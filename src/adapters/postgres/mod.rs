//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresDocumentRepository` - Owner-scoped documents with
//!   advisory-locked quota inserts

mod document_repository;

pub use document_repository::PostgresDocumentRepository;
