//! ListDocumentsHandler - Query handler for an owner's documents.

use std::sync::Arc;

use crate::domain::document::{Document, DocumentError};
use crate::domain::foundation::OwnerIdentity;
use crate::domain::quota::{QuotaDecision, QuotaPolicy};
use crate::ports::DocumentRepository;

/// Query to list the caller's documents.
#[derive(Debug, Clone)]
pub struct ListDocumentsQuery {
    pub owner: OwnerIdentity,
}

/// Documents plus the caller's quota standing.
#[derive(Debug, Clone)]
pub struct ListDocumentsResult {
    /// Most recently updated first.
    pub documents: Vec<Document>,
    pub quota: QuotaDecision,
}

/// Handler for listing documents.
pub struct ListDocumentsHandler {
    repository: Arc<dyn DocumentRepository>,
    policy: Arc<QuotaPolicy>,
}

impl ListDocumentsHandler {
    pub fn new(repository: Arc<dyn DocumentRepository>, policy: Arc<QuotaPolicy>) -> Self {
        Self { repository, policy }
    }

    pub async fn handle(
        &self,
        query: ListDocumentsQuery,
    ) -> Result<ListDocumentsResult, DocumentError> {
        let mut documents = self.repository.list_by_owner(&query.owner.id).await?;

        // Stores are asked for this order already; keep it regardless.
        documents.sort_by(|a, b| b.updated_at().cmp(a.updated_at()));

        let quota = self
            .policy
            .evaluate(&query.owner.email, documents.len() as u32);

        Ok(ListDocumentsResult { documents, quota })
    }
}
