//! GetDocumentHandler - Query handler for a single owned document.

use std::sync::Arc;

use crate::domain::document::{Document, DocumentError};
use crate::domain::foundation::{DocumentId, UserId};
use crate::ports::DocumentRepository;

/// Query to get a document by ID.
#[derive(Debug, Clone)]
pub struct GetDocumentQuery {
    pub document_id: DocumentId,
    pub user_id: UserId,
}

/// Handler for retrieving one document.
pub struct GetDocumentHandler {
    repository: Arc<dyn DocumentRepository>,
}

impl GetDocumentHandler {
    pub fn new(repository: Arc<dyn DocumentRepository>) -> Self {
        Self { repository }
    }

    /// Another owner's document is reported as not found.
    pub async fn handle(&self, query: GetDocumentQuery) -> Result<Document, DocumentError> {
        self.repository
            .find_owned(&query.document_id, &query.user_id)
            .await?
            .ok_or(DocumentError::NotFoundOrForbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::document::test_support::{
        alice, bob, doc_for, MockDocumentRepository,
    };

    #[tokio::test]
    async fn returns_owned_document() {
        let doc = doc_for(&alice(), "Plans");
        let handler = GetDocumentHandler::new(Arc::new(MockDocumentRepository::with(vec![
            doc.clone(),
        ])));

        let found = handler
            .handle(GetDocumentQuery {
                document_id: *doc.id(),
                user_id: alice().id,
            })
            .await
            .unwrap();

        assert_eq!(found, doc);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let handler = GetDocumentHandler::new(Arc::new(MockDocumentRepository::new()));

        let result = handler
            .handle(GetDocumentQuery {
                document_id: DocumentId::new(),
                user_id: alice().id,
            })
            .await;

        assert_eq!(result, Err(DocumentError::NotFoundOrForbidden));
    }

    #[tokio::test]
    async fn foreign_document_looks_like_missing_one() {
        let doc = doc_for(&bob(), "Private");
        let handler = GetDocumentHandler::new(Arc::new(MockDocumentRepository::with(vec![doc.clone()])));

        let foreign = handler
            .handle(GetDocumentQuery {
                document_id: *doc.id(),
                user_id: alice().id,
            })
            .await;
        let missing = handler
            .handle(GetDocumentQuery {
                document_id: DocumentId::new(),
                user_id: alice().id,
            })
            .await;

        assert_eq!(foreign, missing);
    }
}
