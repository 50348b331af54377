//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the document domain.

mod auth;
mod errors;
mod ids;
mod ownership;
mod timestamp;

pub use auth::OwnerIdentity;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{DocumentId, UserId};
pub use ownership::OwnedByUser;
pub use timestamp::Timestamp;
