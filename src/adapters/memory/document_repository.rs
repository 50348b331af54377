//! In-memory document repository for testing and development.
//!
//! Count-and-insert runs under one write guard, so the quota holds under
//! concurrent creation just like the PostgreSQL adapter. State is lost on
//! restart; not for production.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::document::Document;
use crate::domain::foundation::{DocumentId, DomainError, OwnedByUser, UserId};
use crate::domain::quota::QuotaLimit;
use crate::ports::{DocumentRepository, InsertOutcome};

/// In-memory repository keyed by document id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentRepository {
    documents: Arc<RwLock<HashMap<DocumentId, Document>>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total documents across all owners.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

fn owned_count(documents: &HashMap<DocumentId, Document>, owner: &UserId) -> u32 {
    documents.values().filter(|d| d.is_owner(owner)).count() as u32
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Document>, DomainError> {
        let documents = self.documents.read().await;
        let mut owned: Vec<Document> = documents
            .values()
            .filter(|d| d.is_owner(owner))
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.updated_at().cmp(a.updated_at()));
        Ok(owned)
    }

    async fn find_owned(
        &self,
        id: &DocumentId,
        owner: &UserId,
    ) -> Result<Option<Document>, DomainError> {
        let documents = self.documents.read().await;
        Ok(documents.get(id).filter(|d| d.is_owner(owner)).cloned())
    }

    async fn count_by_owner(&self, owner: &UserId) -> Result<u32, DomainError> {
        Ok(owned_count(&*self.documents.read().await, owner))
    }

    async fn insert_within_quota(
        &self,
        document: &Document,
        limit: QuotaLimit,
    ) -> Result<InsertOutcome, DomainError> {
        let mut documents = self.documents.write().await;

        if let QuotaLimit::Limited(max) = limit {
            let current = owned_count(&documents, document.user_id());
            if current >= max {
                return Ok(InsertOutcome::QuotaExceeded { current, limit: max });
            }
        }

        documents.insert(*document.id(), document.clone());
        Ok(InsertOutcome::Inserted)
    }

    async fn update_owned(&self, document: &Document) -> Result<bool, DomainError> {
        let mut documents = self.documents.write().await;
        match documents.get_mut(document.id()) {
            Some(slot) if slot.is_owner(document.user_id()) => {
                *slot = document.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_owned(&self, id: &DocumentId, owner: &UserId) -> Result<bool, DomainError> {
        let mut documents = self.documents.write().await;
        if documents.get(id).is_some_and(|d| d.is_owner(owner)) {
            documents.remove(id);
            return Ok(true);
        }
        Ok(false)
    }
}
