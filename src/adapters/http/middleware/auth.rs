//! Identity extractor.
//!
//! The authentication proxy in front of this service performs the OAuth
//! exchange and forwards the result as two headers:
//!
//! - `X-User-Id` - opaque id from the identity provider
//! - `X-User-Email` - email claim used for quota exemption
//!
//! Handlers take [`RequireOwner`] to receive an [`OwnerIdentity`]. A request
//! missing either header is rejected with 401 before the handler runs.
//!
//! # Example
//!
//! ```ignore
//! async fn protected_handler(RequireOwner(owner): RequireOwner) -> String {
//!     format!("Hello, {}", owner.email)
//! }
//! ```

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Json},
    http::{request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::adapters::http::error::ErrorResponse;
use crate::domain::foundation::OwnerIdentity;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// Extractor that requires an authenticated owner.
#[derive(Debug, Clone)]
pub struct RequireOwner(pub OwnerIdentity);

#[async_trait]
impl<S> FromRequestParts<S> for RequireOwner
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        owner_from_headers(&parts.headers).map(RequireOwner)
    }
}

fn owner_from_headers(headers: &HeaderMap) -> Result<OwnerIdentity, AuthRejection> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let id = header(USER_ID_HEADER).ok_or(AuthRejection::Unauthenticated)?;
    let email = header(USER_EMAIL_HEADER).ok_or(AuthRejection::Unauthenticated)?;

    OwnerIdentity::new(id, email).map_err(|e| {
        tracing::debug!(error = %e, "rejecting malformed identity headers");
        AuthRejection::Unauthenticated
    })
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// Identity headers were absent or blank.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => {
                let error =
                    ErrorResponse::new("AUTHENTICATION_REQUIRED", "Authentication is required");
                (StatusCode::UNAUTHORIZED, Json(error)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(builder: axum::http::request::Builder) -> Result<RequireOwner, AuthRejection> {
        let request: Request<()> = builder.uri("/test").body(()).unwrap();
        let (mut parts, _body) = request.into_parts();
        RequireOwner::from_request_parts(&mut parts, &()).await
    }

    // ════════════════════════════════════════════════════════════════════════════
    // RequireOwner Extractor Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn extracts_owner_from_headers() {
        let result = extract(
            Request::builder()
                .header("X-User-Id", "gh-1")
                .header("X-User-Email", "one@example.com"),
        )
        .await;

        let RequireOwner(owner) = result.unwrap();
        assert_eq!(owner.id.as_str(), "gh-1");
        assert_eq!(owner.email, "one@example.com");
    }

    #[tokio::test]
    async fn rejects_missing_user_id() {
        let result = extract(Request::builder().header("X-User-Email", "one@example.com")).await;
        assert!(matches!(result, Err(AuthRejection::Unauthenticated)));
    }

    #[tokio::test]
    async fn rejects_missing_email() {
        let result = extract(Request::builder().header("X-User-Id", "gh-1")).await;
        assert!(matches!(result, Err(AuthRejection::Unauthenticated)));
    }

    #[tokio::test]
    async fn rejects_blank_values() {
        let result = extract(
            Request::builder()
                .header("X-User-Id", "  ")
                .header("X-User-Email", "one@example.com"),
        )
        .await;
        assert!(matches!(result, Err(AuthRejection::Unauthenticated)));
    }

    #[test]
    fn auth_rejection_returns_401() {
        let response = AuthRejection::Unauthenticated.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn require_owner_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RequireOwner>();
    }
}
