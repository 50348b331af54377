//! Document-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | ValidationFailed | 400 |
//! | NotFoundOrForbidden | 404 |
//! | QuotaExceeded | 403 |
//! | ExportFailed | 500 |
//! | Store | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::ports::ExportError;

/// Errors surfaced by the document and export operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// Caller input was rejected; nothing was written.
    ValidationFailed { field: String, message: String },

    /// The id does not resolve to a document owned by the caller.
    ///
    /// Deliberately does not say which of the two it was.
    NotFoundOrForbidden,

    /// Creating another document would exceed the owner's quota.
    QuotaExceeded { limit: u32 },

    /// The renderer failed; no partial output is returned.
    ExportFailed(String),

    /// Persistence layer unavailable or a transaction failed.
    Store(String),
}

impl DocumentError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DocumentError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn quota_exceeded(limit: u32) -> Self {
        DocumentError::QuotaExceeded { limit }
    }

    pub fn export_failed(message: impl Into<String>) -> Self {
        DocumentError::ExportFailed(message.into())
    }

    pub fn store(message: impl Into<String>) -> Self {
        DocumentError::Store(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DocumentError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            DocumentError::NotFoundOrForbidden => ErrorCode::DocumentNotFound,
            DocumentError::QuotaExceeded { .. } => ErrorCode::QuotaExceeded,
            DocumentError::ExportFailed(_) => ErrorCode::ExportFailed,
            DocumentError::Store(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    ///
    /// Server faults get a generic message; their detail belongs in logs.
    pub fn message(&self) -> String {
        match self {
            DocumentError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            DocumentError::NotFoundOrForbidden => "Document not found".to_string(),
            DocumentError::QuotaExceeded { limit } => format!(
                "Document limit reached. You have reached the maximum of {} documents. \
                 Please delete some documents to create new ones.",
                limit
            ),
            DocumentError::ExportFailed(_) => "Failed to export document".to_string(),
            DocumentError::Store(_) => "An internal error occurred".to_string(),
        }
    }

    /// True for expected, caller-actionable outcomes.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, DocumentError::ExportFailed(_) | DocumentError::Store(_))
    }

    /// Internal detail for logging, never sent to clients.
    pub fn detail(&self) -> Option<&str> {
        match self {
            DocumentError::ExportFailed(d) | DocumentError::Store(d) => Some(d),
            _ => None,
        }
    }
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.detail() {
            Some(detail) => write!(f, "{}: {}", self.message(), detail),
            None => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for DocumentError {}

impl From<ValidationError> for DocumentError {
    fn from(err: ValidationError) -> Self {
        DocumentError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for DocumentError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::DocumentNotFound => DocumentError::NotFoundOrForbidden,
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                let field = err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string());
                DocumentError::ValidationFailed {
                    field,
                    message: err.message,
                }
            }
            ErrorCode::ExportFailed => DocumentError::ExportFailed(err.message),
            _ => DocumentError::Store(err.to_string()),
        }
    }
}

impl From<ExportError> for DocumentError {
    fn from(err: ExportError) -> Self {
        DocumentError::ExportFailed(err.to_string())
    }
}
