//! HTTP middleware for axum.
//!
//! - `auth` - Identity extractor for the forwarded user headers

pub mod auth;

pub use auth::{AuthRejection, RequireOwner, USER_EMAIL_HEADER, USER_ID_HEADER};
