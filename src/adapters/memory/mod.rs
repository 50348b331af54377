//! In-memory adapters for tests and database-less development runs.

mod document_repository;

pub use document_repository::InMemoryDocumentRepository;
