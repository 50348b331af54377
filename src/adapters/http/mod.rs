//! HTTP adapters - REST API implementations.

pub mod documents;
pub mod error;
pub mod middleware;

// Re-export key types for convenience
pub use documents::{api_router, DocumentAppState};
pub use error::{DocumentApiError, ErrorResponse};
pub use middleware::RequireOwner;
