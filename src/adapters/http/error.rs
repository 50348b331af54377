//! Error body shared by every endpoint and the `DocumentError` → HTTP mapping.

use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::domain::document::DocumentError;
use crate::domain::foundation::DomainError;
use crate::ports::ExportError;

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error_code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// API error wrapper that implements IntoResponse.
#[derive(Debug)]
pub struct DocumentApiError(pub DocumentError);

impl From<DocumentError> for DocumentApiError {
    fn from(err: DocumentError) -> Self {
        Self(err)
    }
}

impl From<DomainError> for DocumentApiError {
    fn from(err: DomainError) -> Self {
        Self(DocumentError::from(err))
    }
}

impl From<ExportError> for DocumentApiError {
    fn from(err: ExportError) -> Self {
        Self(DocumentError::from(err))
    }
}

impl DocumentApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DocumentError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            DocumentError::NotFoundOrForbidden => StatusCode::NOT_FOUND,
            DocumentError::QuotaExceeded { .. } => StatusCode::FORBIDDEN,
            DocumentError::ExportFailed(_) | DocumentError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for DocumentApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let Some(detail) = self.0.detail() {
            tracing::error!(code = %self.0.code(), detail, "request failed");
        }

        let mut body = ErrorResponse::new(self.0.code().to_string(), self.0.message());
        match &self.0 {
            DocumentError::QuotaExceeded { limit } => {
                body = body.with_details(serde_json::json!({ "limit": limit }));
            }
            DocumentError::ValidationFailed { field, .. } => {
                body = body.with_details(serde_json::json!({ "field": field }));
            }
            _ => {}
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn validation_maps_to_400() {
        let err = DocumentApiError(DocumentError::validation("content", "empty"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = DocumentApiError(DocumentError::NotFoundOrForbidden);
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn quota_exceeded_maps_to_403_with_limit() {
        let response = DocumentApiError(DocumentError::quota_exceeded(500)).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let json = body_json(response).await;
        assert_eq!(json["error_code"], "QUOTA_EXCEEDED");
        assert_eq!(json["details"]["limit"], 500);
        assert!(json["message"].as_str().unwrap().contains("500"));
    }

    #[tokio::test]
    async fn store_failure_hides_detail() {
        let response =
            DocumentApiError(DocumentError::store("connection refused at 10.0.0.3")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert!(!json.to_string().contains("10.0.0.3"));
        assert!(json.get("details").is_none());
    }

    #[tokio::test]
    async fn export_failure_hides_detail() {
        let err: DocumentApiError = ExportError::pdf_failed("font table corrupt").into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert!(!json.to_string().contains("font table"));
    }

    #[test]
    fn error_response_omits_missing_details() {
        let json = serde_json::to_value(ErrorResponse::new("X", "y")).unwrap();
        assert!(json.get("details").is_none());
    }
}
